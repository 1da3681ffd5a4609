//! Dashboard figures derived from fetched collections

use crate::models::{Booking, BookingStatus, Car, CarStatus, Payment, Role, User};

/// Number of most recent bookings shown on the customer dashboard
pub const RECENT_BOOKINGS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
}

impl FleetStats {
    pub fn from_cars<'a>(cars: impl IntoIterator<Item = &'a Car>) -> Self {
        let mut stats = Self::default();
        for car in cars {
            stats.total += 1;
            match car.status {
                CarStatus::Available => stats.available += 1,
                CarStatus::Rented => stats.rented += 1,
                CarStatus::UnderMaintenance => stats.maintenance += 1,
            }
        }
        stats
    }
}

/// Booking counts per status and revenue from completed bookings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub confirmed: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub revenue: f64,
}

impl BookingStats {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut stats = Self::default();
        for booking in bookings {
            stats.total += 1;
            match booking.status {
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Approved => stats.approved += 1,
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Active => stats.active += 1,
                BookingStatus::Completed => {
                    stats.completed += 1;
                    stats.revenue += booking.total_price;
                }
                BookingStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: BookingStatus) -> usize {
        match status {
            BookingStatus::Pending => self.pending,
            BookingStatus::Approved => self.approved,
            BookingStatus::Confirmed => self.confirmed,
            BookingStatus::Active => self.active,
            BookingStatus::Completed => self.completed,
            BookingStatus::Cancelled => self.cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentStats {
    pub total_revenue: f64,
    pub count: usize,
    pub average: f64,
}

impl PaymentStats {
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Self {
        let (total_revenue, count) = payments
            .into_iter()
            .fold((0.0, 0usize), |(sum, n), p| (sum + p.amount, n + 1));
        let average = if count > 0 {
            total_revenue / count as f64
        } else {
            0.0
        };
        Self {
            total_revenue,
            count,
            average,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub customers: usize,
    pub admins: usize,
}

impl UserStats {
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        let mut stats = Self::default();
        for user in users {
            stats.total += 1;
            match user.role {
                Some(Role::Customer) => stats.customers += 1,
                Some(Role::Admin) => stats.admins += 1,
                None => {}
            }
        }
        stats
    }
}

/// Figures on the customer dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSummary {
    pub active: usize,
    pub completed: usize,
    pub pending: usize,
    pub total_spent: f64,
    pub recent: Vec<Booking>,
}

impl CustomerSummary {
    /// `bookings` in the order the backend returned them
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let stats = BookingStats::from_bookings(bookings);
        Self {
            active: stats.active,
            completed: stats.completed,
            pending: stats.pending,
            total_spent: stats.revenue,
            recent: bookings.iter().take(RECENT_BOOKINGS).cloned().collect(),
        }
    }
}
