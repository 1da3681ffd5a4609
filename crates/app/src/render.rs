//! Plain-text rendering of screen data for the terminal

use std::fmt::{self, Write as _};

use carhire_core::stats::{BookingStats, CustomerSummary};
use carhire_core::{Booking, Car, FieldErrors, Payment, SessionUser, User};

use crate::viewmodel::bookings::{status_label, BookingScreen, MyBookings};
use crate::viewmodel::cars::{CarDetails, FleetScreen};
use crate::viewmodel::dashboard::AdminOverview;
use crate::viewmodel::payments::PaymentScreen;
use crate::viewmodel::users::UserScreen;

/// Column-aligned text table
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_cells(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            write_cells(f, row, &widths)?;
        }
        Ok(())
    }
}

/// `Rs. 15,000.00`
pub fn money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("Rs. {}{}.{}", sign, grouped, cents)
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {}: {}", field, message);
    }
    out
}

pub fn session_user(user: &SessionUser) -> String {
    let role = user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "{} (#{}) {} [{}]",
        user.display_name(),
        user.user_id,
        user.email.as_deref().unwrap_or(""),
        role
    )
}

fn car_table<'a>(cars: impl IntoIterator<Item = &'a Car>) -> Table {
    let mut table = Table::new(["ID", "Car", "Plate", "Fuel", "Rate/day", "Year", "Seats", "Status"]);
    for car in cars {
        table.row(vec![
            car.car_id.to_string(),
            car.title(),
            car.plate_number.clone(),
            car.types_of_fuel.clone(),
            money(car.rate),
            car.year.to_string(),
            car.seating_capacity.to_string(),
            car.status.to_string(),
        ]);
    }
    table
}

pub fn fleet(screen: &FleetScreen) -> String {
    let visible = screen.visible();
    if visible.is_empty() {
        return format!("{}\n", screen.empty_message());
    }
    format!(
        "{}\n{} of {} cars",
        car_table(visible.iter().copied()),
        visible.len(),
        screen.items.len()
    )
}

pub fn car_details(details: &CarDetails) -> String {
    let car = &details.car;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", car.title(), car.year);
    let _ = writeln!(out, "Plate:   {}", car.plate_number);
    let _ = writeln!(out, "Fuel:    {}", car.types_of_fuel);
    let _ = writeln!(out, "Seats:   {}", car.seating_capacity);
    let _ = writeln!(out, "Rate:    {} per day", money(car.rate));
    let _ = writeln!(out, "Status:  {}", car.status);
    if let Some(description) = car.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "\n{}", description);
    }
    for url in &details.image_urls {
        let _ = writeln!(out, "Image:   {}", url);
    }
    if details.quote.days > 0 {
        let _ = writeln!(
            out,
            "\n{} day(s), total {}",
            details.quote.days,
            money(details.quote.total)
        );
    }
    out
}

pub fn booking(booking: &Booking) -> String {
    format!(
        "Booking #{} {} {} to {} {} {}",
        booking.booking_id,
        booking.car_label(),
        booking.start_date,
        booking.end_date,
        money(booking.total_price),
        status_label(booking.status)
    )
}

pub fn my_bookings(mine: &MyBookings) -> String {
    let visible = mine.screen.visible();
    if visible.is_empty() {
        return format!("{}\n", mine.screen.empty_message());
    }
    let mut table = Table::new(["ID", "Car", "From", "To", "Total", "Status", "Paid", "Actions"]);
    for b in visible {
        let paid = if mine.is_paid(b) {
            "yes"
        } else if mine.unknown.contains(&b.booking_id) {
            "?"
        } else {
            "no"
        };
        let mut actions = Vec::new();
        if mine.can_pay(b) {
            actions.push("pay");
        }
        if b.status.is_cancellable() {
            actions.push("cancel");
        }
        table.row(vec![
            b.booking_id.to_string(),
            b.car_label(),
            b.start_date.to_string(),
            b.end_date.to_string(),
            money(b.total_price),
            status_label(b.status),
            paid.to_string(),
            actions.join(","),
        ]);
    }
    table.to_string()
}

fn booking_stats(stats: &BookingStats) -> String {
    format!(
        "Total {} | pending {} | approved {} | confirmed {} | active {} | completed {} | cancelled {} | revenue {}",
        stats.total,
        stats.pending,
        stats.approved,
        stats.confirmed,
        stats.active,
        stats.completed,
        stats.cancelled,
        money(stats.revenue)
    )
}

pub fn admin_bookings(screen: &BookingScreen) -> String {
    let mut out = booking_stats(&screen.stats());
    out.push('\n');
    let visible = screen.visible();
    if visible.is_empty() {
        out.push_str(screen.empty_message());
        out.push('\n');
        return out;
    }
    let mut table = Table::new(["ID", "Customer", "Email", "Car", "From", "To", "Total", "Status"]);
    for b in visible {
        table.row(vec![
            b.booking_id.to_string(),
            opt(b.customer_name.as_deref()),
            opt(b.email.as_deref()),
            b.car_label(),
            b.start_date.to_string(),
            b.end_date.to_string(),
            money(b.total_price),
            status_label(b.status),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn payment(payment: &Payment) -> String {
    format!(
        "Payment #{} for booking #{}: {} on {} via {} ({})",
        payment.payment_id,
        payment.booking_id,
        money(payment.amount),
        opt(payment.payment_date.as_deref()),
        opt(payment.payment_method.as_deref()),
        opt(payment.payment_status.as_deref())
    )
}

pub fn payments(screen: &PaymentScreen) -> String {
    let stats = screen.stats();
    let mut out = format!(
        "Revenue {} | payments {} | average {}\n",
        money(stats.total_revenue),
        stats.count,
        money(stats.average)
    );
    let visible = screen.visible();
    if visible.is_empty() {
        out.push_str(screen.empty_message());
        out.push('\n');
        return out;
    }
    let mut table = Table::new(["ID", "Booking", "Amount", "Date", "Method"]);
    for p in visible {
        table.row(vec![
            p.payment_id.to_string(),
            p.booking_id.to_string(),
            money(p.amount),
            p.payment_day()
                .map(|d| d.to_string())
                .unwrap_or_else(|| opt(p.payment_date.as_deref())),
            opt(p.payment_method.as_deref()),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn user(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "User #{}", user.user_id);
    let _ = writeln!(out, "Name:     {}", user.name());
    let _ = writeln!(out, "Username: {}", opt(user.username.as_deref()));
    let _ = writeln!(out, "Email:    {}", opt(user.email.as_deref()));
    let _ = writeln!(out, "Phone:    {}", opt(user.phone_number.as_deref()));
    let _ = writeln!(out, "Address:  {}", opt(user.address.as_deref()));
    let _ = writeln!(out, "NIC:      {}", opt(user.nic.as_deref()));
    let _ = writeln!(
        out,
        "Role:     {}",
        user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
    );
    out
}

pub fn users(screen: &UserScreen) -> String {
    let stats = screen.stats();
    let mut out = format!(
        "Users {} | customers {} | admins {}\n",
        stats.total, stats.customers, stats.admins
    );
    let visible = screen.visible();
    if visible.is_empty() {
        out.push_str(screen.empty_message());
        out.push('\n');
        return out;
    }
    let mut table = Table::new(["ID", "Name", "Email", "Phone", "Role"]);
    for u in visible {
        table.row(vec![
            u.user_id.to_string(),
            u.name(),
            opt(u.email.as_deref()),
            opt(u.phone_number.as_deref()),
            u.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn customer_dashboard(summary: &CustomerSummary) -> String {
    let mut out = format!(
        "Active {} | completed {} | pending {} | spent {}\n",
        summary.active,
        summary.completed,
        summary.pending,
        money(summary.total_spent)
    );
    if summary.recent.is_empty() {
        out.push_str("No bookings yet\n");
        return out;
    }
    out.push_str("\nRecent bookings\n");
    for b in &summary.recent {
        let _ = writeln!(out, "  {}", booking(b));
    }
    out
}

pub fn admin_dashboard(overview: &AdminOverview) -> String {
    let fleet = &overview.fleet;
    let users = &overview.users;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Fleet    {} cars | available {} | rented {} | maintenance {}",
        fleet.total, fleet.available, fleet.rented, fleet.maintenance
    );
    let _ = writeln!(out, "Bookings {}", booking_stats(&overview.bookings));
    let _ = writeln!(
        out,
        "Payments {} received over {} payments",
        money(overview.payments.total_revenue),
        overview.payments.count
    );
    let _ = writeln!(
        out,
        "Users    {} | customers {} | admins {}",
        users.total, users.customers, users.admins
    );
    out
}
