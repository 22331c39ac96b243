use chrono::Utc;
use lunisolar::{leap_month, solar_to_lunar, SolarDate, TimeZone};

fn main() {
    let today = SolarDate::from(Utc::now().date_naive());
    let lunar = solar_to_lunar(today, TimeZone::CST).expect("valid civil date");

    println!("solar: {today}");
    println!("lunar: {lunar}");
    match leap_month(lunar.year, TimeZone::CST) {
        Some(month) => println!("lunar year {} inserts a leap month {month}", lunar.year),
        None => println!("lunar year {} has twelve months", lunar.year),
    }
}
