//! In-memory list filtering
//!
//! Every list screen keeps the full fetched collection and derives the
//! displayed subset from it. Predicates are AND-combined and independent of
//! each other, so the order they are applied in never changes the result.
//! An unset predicate accepts everything.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus, Car, CarStatus, Payment, Role, User};

/// A predicate over list items
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Items that take part in free-text search
pub trait Searchable {
    /// Text of every searchable field
    fn search_fields(&self) -> Vec<String>;
}

/// Items of `items` accepted by `filter`, in their original order
pub fn apply<'a, T, F>(items: &'a [T], filter: &F) -> Vec<&'a T>
where
    F: Filter<T> + ?Sized,
{
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Narrow an already filtered view further
pub fn refine<'a, T, F>(items: Vec<&'a T>, filter: &F) -> Vec<&'a T>
where
    F: Filter<T> + ?Sized,
{
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

/// Case-insensitive substring match over the item's searchable fields
pub fn text_matches<T: Searchable>(item: &T, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Sorted distinct non-empty values of one field, for filter option lists
pub fn distinct_values<T, F>(items: &[T], key: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .map(|item| key(item).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl Searchable for Car {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.brand.clone(),
            self.car_model.clone(),
            self.plate_number.clone(),
        ]
    }
}

impl Searchable for Booking {
    fn search_fields(&self) -> Vec<String> {
        vec![
            opt(&self.customer_name),
            opt(&self.email),
            self.booking_id.to_string(),
            opt(&self.car_model),
        ]
    }
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.payment_id.to_string(),
            self.booking_id.to_string(),
            opt(&self.payment_method),
            self.amount.to_string(),
        ]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![
            opt(&self.username),
            opt(&self.email),
            opt(&self.full_name),
            opt(&self.first_name),
            opt(&self.last_name),
        ]
    }
}

/// Fleet filters used by both the admin list and the customer browser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    pub status: Option<CarStatus>,
    pub search: String,
    pub brand: Option<String>,
    pub fuel: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub min_seats: Option<u32>,
}

impl CarFilter {
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Filter<Car> for CarFilter {
    fn matches(&self, car: &Car) -> bool {
        self.status.map_or(true, |s| car.status == s)
            && text_matches(car, &self.search)
            && self.brand.as_deref().map_or(true, |b| car.brand == b)
            && self.fuel.as_deref().map_or(true, |f| car.types_of_fuel == f)
            && self.min_rate.map_or(true, |min| car.rate >= min)
            && self.max_rate.map_or(true, |max| car.rate <= max)
            && self.min_seats.map_or(true, |seats| car.seating_capacity >= seats)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub search: String,
}

impl BookingFilter {
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Filter<Booking> for BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        self.status.map_or(true, |s| booking.status == s) && text_matches(booking, &self.search)
    }
}

/// Payment filters; the date range only applies once both ends are set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    pub search: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PaymentFilter {
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn in_range(&self, payment: &Payment) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => payment
                .payment_day()
                .is_some_and(|day| day >= from && day <= to),
            _ => true,
        }
    }
}

impl Filter<Payment> for PaymentFilter {
    fn matches(&self, payment: &Payment) -> bool {
        self.in_range(payment) && text_matches(payment, &self.search)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub search: String,
}

impl UserFilter {
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |r| user.role == Some(r)) && text_matches(user, &self.search)
    }
}
