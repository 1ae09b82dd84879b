use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use yuuka::derive_struct;

// Include translation TOML at compile time
const EN_US_TOML: &str = include_str!("../res/i18n/en_us.toml");
const TR_TR_TOML: &str = include_str!("../res/i18n/tr_tr.toml");

derive_struct! {
    #[derive(PartialEq, Serialize, Deserialize)]
    pub Lang {
        title: String = "title".to_string(),
        // transport selection
        transport_group: String = "transport_group".to_string(),
        transport_udp: String = "transport_udp".to_string(),
        transport_serial: String = "transport_serial".to_string(),
        label_ip: String = "label_ip".to_string(),
        label_port: String = "label_port".to_string(),
        label_port_name: String = "label_port_name".to_string(),
        label_baud: String = "label_baud".to_string(),
        placeholder_ip: String = "placeholder_ip".to_string(),
        placeholder_port: String = "placeholder_port".to_string(),
        placeholder_port_name: String = "placeholder_port_name".to_string(),
        placeholder_baud: String = "placeholder_baud".to_string(),
        detected_ports: String = "detected_ports".to_string(),
        no_detected_ports: String = "no_detected_ports".to_string(),
        connect: String = "connect".to_string(),
        disconnect: String = "disconnect".to_string(),
        select_transport_hint: String = "select_transport_hint".to_string(),
        // sensor group
        sensor_group: String = "sensor_group".to_string(),
        label_sensor: String = "label_sensor".to_string(),
        label_state: String = "label_state".to_string(),
        no_sensors: String = "no_sensors".to_string(),
        send: String = "send".to_string(),
        // sensor state labels
        state_walking: String = "state_walking".to_string(),
        state_car: String = "state_car".to_string(),
        state_digging: String = "state_digging".to_string(),
        state_on: String = "state_on".to_string(),
        state_off: String = "state_off".to_string(),
        state_ignore: String = "state_ignore".to_string(),
        state_alarm: String = "state_alarm".to_string(),
        // activity panel and status line
        activity: String = "activity".to_string(),
        activity_empty: String = "activity_empty".to_string(),
        status_connected: String = "status_connected".to_string(),
        status_disconnected: String = "status_disconnected".to_string(),
        help_short: String = "help_short".to_string(),
        press_any_key_clear: String = "press_any_key_clear".to_string(),
    }
}

static LANG_SELECTED: OnceCell<Lang> = OnceCell::new();
static LOCALE: OnceCell<String> = OnceCell::new();

fn parse_toml_to_lang(content: &str) -> Lang {
    match toml::from_str::<Lang>(content) {
        Ok(l) => l,
        Err(e) => {
            log::warn!(
                "i18n: failed to parse toml: {}\ncontent preview: {}",
                e,
                &content.chars().take(200).collect::<String>()
            );
            // Fallback: return the default Lang (keys as values)
            Lang::default()
        }
    }
}

/// Return a reference to the currently selected `Lang`.
/// Callers can access fields directly, e.g. `i18n::lang().title`.
pub fn lang() -> &'static Lang {
    // Before init_i18n runs (unit tests, library use) English is used.
    LANG_SELECTED.get_or_init(|| parse_toml_to_lang(EN_US_TOML))
}

/// Locale key picked by `init_i18n`, if it ran.
pub fn locale() -> Option<&'static str> {
    LOCALE.get().map(|s| s.as_str())
}

/// Map environment language preferences onto an available locale key.
fn pick_locale(prefs: &[String]) -> &'static str {
    for p in prefs.iter() {
        if p.starts_with("tr") || p.contains("_tr") || p.contains("-tr") {
            return "tr_tr";
        }
        if p.starts_with("en") {
            return "en_us";
        }
    }
    "en_us"
}

pub fn init_i18n() {
    // Detect preferred languages from env vars
    let mut prefs: Vec<String> = Vec::new();
    if let Ok(v) = std::env::var("LANGUAGE") {
        prefs.extend(v.split(':').filter(|s| !s.is_empty()).map(|s| s.to_lowercase()));
    }
    if let Ok(v) = std::env::var("LC_ALL") {
        prefs.push(v.to_lowercase());
    }
    if let Ok(v) = std::env::var("LANG") {
        prefs.push(v.to_lowercase());
    }
    // Windows common env
    if let Ok(v) = std::env::var("USERLANGUAGE") {
        prefs.push(v.to_lowercase());
    }

    let chosen = pick_locale(&prefs);
    let table = match chosen {
        "tr_tr" => parse_toml_to_lang(TR_TR_TOML),
        _ => parse_toml_to_lang(EN_US_TOML),
    };

    LOCALE.set(chosen.to_string()).ok();
    if LANG_SELECTED.set(table).is_err() {
        log::debug!("i18n: language table already initialized, keeping it");
    }

    let user = whoami::username();
    log::info!("i18n: user={} locale={}", user, locale().unwrap_or("-"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_are_complete() {
        let en = parse_toml_to_lang(EN_US_TOML);
        let tr = parse_toml_to_lang(TR_TR_TOML);
        assert!(en != Lang::default());
        assert!(tr != Lang::default());
        assert_eq!(en.state_digging, "Digging");
        assert_eq!(tr.state_walking, "Yürüme");
        assert_eq!(tr.state_off, "Kapalı");
    }

    #[test]
    fn test_pick_locale() {
        assert_eq!(pick_locale(&["tr_tr.utf-8".to_string()]), "tr_tr");
        assert_eq!(pick_locale(&["en_us.utf-8".to_string()]), "en_us");
        assert_eq!(pick_locale(&["de_de.utf-8".to_string()]), "en_us");
        assert_eq!(pick_locale(&[]), "en_us");
        // "c.utf-8" and similar carry no preference
        assert_eq!(
            pick_locale(&["c.utf-8".to_string(), "tr".to_string()]),
            "tr_tr"
        );
    }
}
