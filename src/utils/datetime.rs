use chrono::Local;

/// Stamp format used throughout the persisted file.
pub const STAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Current local time in the persisted stamp format.
pub fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}
