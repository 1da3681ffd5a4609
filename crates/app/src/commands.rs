//! Dispatch from parsed commands to screens

use carhire_core::validation::RegistrationForm;
use carhire_core::{
    BookingFilter, CarDraft, CarFilter, Credentials, PaymentFilter, Route, UserFilter, UserUpdate,
};
use chrono::{Datelike, Local, NaiveDate};

use crate::cli::{
    BookingsCommand, CarFields, CarsCommand, Command, ExportArgs, PaymentsCommand,
    ProfileCommand, ProfileFields, UsersCommand,
};
use crate::render;
use crate::state::AppState;
use crate::viewmodel::bookings::{self, BookingEdit};
use crate::viewmodel::cars::{self, BookingRequest, CarPatch};
use crate::viewmodel::{auth, dashboard, export_csv, payments, users, ScreenResult};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run one command and return what to print
pub async fn run(state: &mut AppState, command: Command) -> ScreenResult<String> {
    match command {
        Command::Login { email, password } => {
            let credentials = Credentials { email, password };
            let landing = auth::login(state, &credentials).await?;
            let name = state
                .session()
                .user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            Ok(format!("Welcome, {}. Next: {}", name, landing))
        }
        Command::Register(args) => {
            let form = RegistrationForm {
                full_name: args.full_name,
                email: args.email,
                password: args.password,
                confirm_password: args.confirm_password,
                phone_number: args.phone,
                address: args.address,
                nic: args.nic,
            };
            let next = auth::register(state, &form).await?;
            Ok(format!("Registration successful. Please log in ({}).", next))
        }
        Command::Logout => {
            auth::logout(state)?;
            Ok("Logged out.".to_string())
        }
        Command::Whoami => {
            let who = match auth::whoami(state) {
                Some(user) => render::session_user(user),
                None => "Not logged in.".to_string(),
            };
            Ok(format!("{}\nBackend: {}", who, state.config.base_url()))
        }
        Command::Dashboard => match Route::landing_for(state.session().role()) {
            Route::AdminDashboard => Ok(render::admin_dashboard(&dashboard::admin(state).await?)),
            _ => Ok(render::customer_dashboard(
                &dashboard::customer(state).await?,
            )),
        },
        Command::Cars(command) => run_cars(state, command).await,
        Command::Bookings(command) => run_bookings(state, command).await,
        Command::Payments(command) => run_payments(state, command).await,
        Command::Users(command) => run_users(state, command).await,
        Command::Profile(command) => run_profile(state, command).await,
    }
}

fn exported(path: &std::path::Path, rows: usize) -> String {
    format!("Exported {} rows to {}", rows, path.display())
}

async fn run_cars(state: &mut AppState, command: CarsCommand) -> ScreenResult<String> {
    let year = today().year();
    match command {
        CarsCommand::Browse {
            brand,
            fuel,
            min_rate,
            max_rate,
            min_seats,
        } => {
            let filter = CarFilter {
                brand,
                fuel,
                min_rate,
                max_rate,
                min_seats,
                ..Default::default()
            };
            let screen = cars::browse(state, filter).await?;
            Ok(format!(
                "{}\nBrands: {}\nFuel types: {}",
                render::fleet(&screen),
                screen.brands().join(", "),
                screen.fuels().join(", ")
            ))
        }
        CarsCommand::Show { car_id, start, end } => {
            let details = cars::details(state, car_id, start, end).await?;
            Ok(render::car_details(&details))
        }
        CarsCommand::Book { car_id, start, end } => {
            let request = BookingRequest { car_id, start, end };
            let booking = cars::book(state, request, today()).await?;
            Ok(format!("Booking created.\n{}", render::booking(&booking)))
        }
        CarsCommand::List {
            status,
            search,
            export,
        } => {
            let filter = CarFilter {
                status,
                search,
                ..Default::default()
            };
            let screen = cars::manage(state, filter).await?;
            with_export(render::fleet(&screen), &screen.visible(), export)
        }
        CarsCommand::Add(args) => {
            let draft = CarDraft {
                brand: args.brand,
                car_model: args.model,
                plate_number: args.plate,
                types_of_fuel: args.fuel,
                rate: args.rate,
                year: args.year.unwrap_or(year),
                seating_capacity: args.seats,
                status: args.status,
                description: args.description,
            };
            let added = cars::add(state, &draft, &args.images, year).await?;
            let mut out = format!(
                "Car #{} added: {}. {} image(s) uploaded.",
                added.car.car_id,
                added.car.title(),
                added.images_uploaded
            );
            if let Some(error) = added.image_error {
                out.push_str(&format!("\nImages were not stored: {}", error));
            }
            Ok(out)
        }
        CarsCommand::Update { car_id, fields } => {
            let car = cars::update(state, car_id, &car_patch(fields), year).await?;
            Ok(format!("Car #{} updated: {}", car.car_id, car.title()))
        }
        CarsCommand::Status { car_id, status } => {
            cars::set_status(state, car_id, status).await?;
            Ok(format!("Car #{} is now {}", car_id, status))
        }
        CarsCommand::Delete { car_id } => {
            cars::delete(state, car_id).await?;
            Ok(format!("Car #{} deleted", car_id))
        }
    }
}

fn car_patch(fields: CarFields) -> CarPatch {
    CarPatch {
        brand: fields.brand,
        car_model: fields.model,
        plate_number: fields.plate,
        types_of_fuel: fields.fuel,
        rate: fields.rate,
        year: fields.year,
        seating_capacity: fields.seats,
        status: fields.status,
        description: fields.description,
    }
}

async fn run_bookings(state: &mut AppState, command: BookingsCommand) -> ScreenResult<String> {
    match command {
        BookingsCommand::Mine { status } => {
            let mine = bookings::mine(state, status).await?;
            Ok(render::my_bookings(&mine))
        }
        BookingsCommand::Cancel { booking_id } => {
            bookings::cancel(state, booking_id).await?;
            Ok("Booking cancelled successfully".to_string())
        }
        BookingsCommand::List {
            status,
            search,
            export,
        } => {
            let filter = BookingFilter { status, search };
            let screen = bookings::manage(state, filter).await?;
            with_export(render::admin_bookings(&screen), &screen.visible(), export)
        }
        BookingsCommand::Status { booking_id, status } => {
            bookings::set_status(state, booking_id, status).await?;
            Ok(format!("Booking #{} is now {}", booking_id, status))
        }
        BookingsCommand::Edit {
            booking_id,
            start,
            end,
            status,
            total,
        } => {
            let edit = BookingEdit {
                start_date: start,
                end_date: end,
                status,
                total_price: total,
            };
            let booking = bookings::edit(state, booking_id, &edit).await?;
            Ok(format!("Booking updated.\n{}", render::booking(&booking)))
        }
        BookingsCommand::Delete { booking_id } => {
            bookings::delete(state, booking_id).await?;
            Ok(format!("Booking #{} deleted", booking_id))
        }
    }
}

async fn run_payments(state: &mut AppState, command: PaymentsCommand) -> ScreenResult<String> {
    match command {
        PaymentsCommand::Pay {
            booking_id,
            date,
            method,
        } => {
            let checkout = payments::Checkout {
                payment_date: date,
                payment_method: method,
            };
            let payment = payments::pay(state, booking_id, &checkout, today()).await?;
            Ok(format!("Payment successful.\n{}", render::payment(&payment)))
        }
        PaymentsCommand::List {
            search,
            from,
            to,
            server,
            export,
        } => {
            let screen = if server {
                payments::in_range(state, from, to, search).await?
            } else {
                let filter = PaymentFilter { search, from, to };
                payments::manage(state, filter).await?
            };
            with_export(render::payments(&screen), &screen.visible(), export)
        }
        PaymentsCommand::Show { payment_id } => {
            let payment = payments::view(state, payment_id).await?;
            Ok(render::payment(&payment))
        }
        PaymentsCommand::Delete { payment_id } => {
            payments::delete(state, payment_id).await?;
            Ok(format!("Payment #{} deleted", payment_id))
        }
    }
}

fn user_update(fields: ProfileFields) -> UserUpdate {
    UserUpdate {
        username: fields.username,
        full_name: fields.full_name,
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone_number: fields.phone,
        address: fields.address,
        nic: fields.nic,
        role: None,
    }
}

async fn run_users(state: &mut AppState, command: UsersCommand) -> ScreenResult<String> {
    match command {
        UsersCommand::List {
            role,
            search,
            export,
        } => {
            let screen = users::manage(state, UserFilter { role, search }).await?;
            with_export(render::users(&screen), &screen.visible(), export)
        }
        UsersCommand::Show { user_id } => Ok(render::user(&users::view(state, user_id).await?)),
        UsersCommand::Edit {
            user_id,
            fields,
            role,
        } => {
            let update = UserUpdate {
                role,
                ..user_update(fields)
            };
            let user = users::edit(state, user_id, &update).await?;
            Ok(format!("User updated.\n{}", render::user(&user)))
        }
        UsersCommand::Delete { user_id } => {
            users::delete(state, user_id).await?;
            Ok(format!("User #{} deleted", user_id))
        }
    }
}

async fn run_profile(state: &mut AppState, command: ProfileCommand) -> ScreenResult<String> {
    match command {
        ProfileCommand::Show => Ok(render::user(&users::profile(state).await?)),
        ProfileCommand::Update { fields } => {
            let user = users::update_profile(state, &user_update(fields)).await?;
            Ok(format!(
                "Profile updated successfully!\n{}",
                render::session_user(&user)
            ))
        }
    }
}

/// Print the list, and write it out as CSV when asked
fn with_export<T: carhire_core::CsvRecord>(
    listing: String,
    rows: &[&T],
    export: ExportArgs,
) -> ScreenResult<String> {
    if !export.export {
        return Ok(listing);
    }
    let (path, count) = export_csv(rows, export.output, today())?;
    Ok(format!("{}\n{}", listing, exported(&path, count)))
}
