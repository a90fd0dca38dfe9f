use log::Level;

/// Number the calculator quote is sent to.
pub const WHATSAPP_PHONE: &str = "996500245780";

pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
pub const HEADER_FALLBACK_HEIGHT: f64 = 80.0;

pub const ANIMATE_THRESHOLD: f64 = 0.15;
pub const ANIMATE_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const COUNTER_DURATION_MS: f64 = 2000.0;
pub const COUNTER_FRAME_MS: f64 = 16.0;
pub const COUNTER_SUFFIX_FROM: i64 = 100;

pub const AREA_MIN: i64 = 10;
pub const AREA_MAX: i64 = 500;
pub const AREA_RANGE_MAX: i64 = 200;
pub const AREA_DEFAULT: i64 = 50;

pub const REPAIR_PRICE_DEFAULT: i64 = 4000;
pub const EXTRA_PRICE_DEFAULT: i64 = 0;

pub const PRICE_PULSE_MS: u32 = 150;
pub const CURRENCY: &str = "сом";

pub const HAPTIC_SELECTOR: &str = ".btn, .option-card, .extra-card";
pub const HAPTIC_DURATION_MS: u32 = 10;

pub fn whatsapp_base_url() -> String {
    format!("https://wa.me/{}", WHATSAPP_PHONE)
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
