//! User-Agent classification into the device and browser labels used by reports.

use woothee::parser::Parser;

/// Device and browser labels extracted from a User-Agent header.
///
/// `None` means woothee could not tell; reports render it as `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientLabels {
    pub device: Option<String>,
    pub browser: Option<String>,
}

/// Parses a User-Agent string with woothee.
///
/// Device categories are folded into `desktop`, `mobile`, `appliance` and
/// `bot`; browser names are kept as woothee reports them (`Chrome`,
/// `Firefox`, `Safari`, ...).
pub fn classify_user_agent(user_agent: &str) -> ClientLabels {
    let parser = Parser::new();
    let Some(result) = parser.parse(user_agent) else {
        return ClientLabels::default();
    };

    let device = match result.category {
        "pc" => Some("desktop"),
        "smartphone" | "mobilephone" => Some("mobile"),
        "appliance" => Some("appliance"),
        "crawler" => Some("bot"),
        _ => None,
    };

    let browser = (!result.name.is_empty() && result.name != "UNKNOWN").then_some(result.name);

    ClientLabels {
        device: device.map(str::to_string),
        browser: browser.map(str::to_string),
    }
}
