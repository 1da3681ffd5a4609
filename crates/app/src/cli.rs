//! Command-line surface

use std::path::PathBuf;

use carhire_core::{BookingStatus, CarStatus, Role};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "carhire", version, about = "Car rental client")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CARHIRE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a customer account
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Dashboard for the signed-in role
    Dashboard,
    #[command(subcommand)]
    Cars(CarsCommand),
    #[command(subcommand)]
    Bookings(BookingsCommand),
    #[command(subcommand)]
    Payments(PaymentsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub nic: String,
}

/// Where to write a CSV export
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export the listed rows as CSV
    #[arg(long)]
    pub export: bool,
    /// Output file; defaults to `{entity}_{date}.csv`
    #[arg(long, value_name = "PATH", requires = "export")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CarsCommand {
    /// Available cars, for customers
    Browse {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        fuel: Option<String>,
        #[arg(long)]
        min_rate: Option<f64>,
        #[arg(long)]
        max_rate: Option<f64>,
        #[arg(long)]
        min_seats: Option<u32>,
    },
    /// Car details with a price preview
    Show {
        car_id: i64,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Book a car
    Book {
        car_id: i64,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// The whole fleet, for admins
    List {
        #[arg(long)]
        status: Option<CarStatus>,
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Add a car with optional images
    Add(AddCarArgs),
    /// Edit a car
    Update {
        car_id: i64,
        #[command(flatten)]
        fields: CarFields,
    },
    /// Change a car's status
    Status { car_id: i64, status: CarStatus },
    Delete { car_id: i64 },
}

#[derive(Debug, Args)]
pub struct AddCarArgs {
    #[arg(long)]
    pub brand: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub plate: String,
    #[arg(long)]
    pub fuel: String,
    #[arg(long)]
    pub rate: f64,
    /// Defaults to the current year
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub seats: u32,
    #[arg(long, default_value = "available")]
    pub status: CarStatus,
    #[arg(long)]
    pub description: Option<String>,
    /// Image file to upload; repeat for more
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CarFields {
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub plate: Option<String>,
    #[arg(long)]
    pub fuel: Option<String>,
    #[arg(long)]
    pub rate: Option<f64>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub seats: Option<u32>,
    #[arg(long)]
    pub status: Option<CarStatus>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// Your bookings
    Mine {
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    Cancel { booking_id: i64 },
    /// All bookings, for admins
    List {
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        export: ExportArgs,
    },
    Status {
        booking_id: i64,
        status: BookingStatus,
    },
    Edit {
        booking_id: i64,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long)]
        total: Option<f64>,
    },
    Delete { booking_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// Pay for one of your bookings
    Pay {
        booking_id: i64,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        method: Option<String>,
    },
    /// All payments, for admins
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Ask the backend for the date range instead of filtering locally
        #[arg(long)]
        server: bool,
        #[command(flatten)]
        export: ExportArgs,
    },
    Show { payment_id: i64 },
    Delete { payment_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        export: ExportArgs,
    },
    Show { user_id: i64 },
    Edit {
        user_id: i64,
        #[command(flatten)]
        fields: ProfileFields,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete { user_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[command(flatten)]
        fields: ProfileFields,
    },
}

#[derive(Debug, Args)]
pub struct ProfileFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub nic: Option<String>,
}
