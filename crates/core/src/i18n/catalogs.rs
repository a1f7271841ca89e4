//! Built-in string tables.
//!
//! Every catalog must define every key in [`REQUIRED_KEYS`]; the registry
//! refuses incomplete catalogs at startup.

/// Keys the presentation layer and the action messages rely on.
pub const REQUIRED_KEYS: &[&str] = &[
    "html_lang",
    "subtitle",
    "bridge_label",
    "error_keyword",
    "lock_state_title",
    "state_details_title",
    "state_details_subtitle",
    "lock_label",
    "door_label",
    "battery_label",
    "last_update_label",
    "reading_state",
    "refresh_state",
    "btn_lock",
    "btn_unlock",
    "btn_unlatch",
    "btn_lockngo",
    "normalized_json_summary",
    "footer_http_api",
    "summary_lock_prefix",
    "summary_lock_state_prefix",
    "summary_door_prefix",
    "summary_door_state_prefix",
    "summary_batt_prefix",
    "summary_batt_critical_prefix",
    "summary_last_update_prefix",
    "no_state_data",
    "error_prefix",
    "js_error_prefix",
    "critical_label",
    "ok_label",
    "date_locale",
    "lang_en_label",
    "lang_it_label",
    "action_ok",
    "bridge_response_prefix",
    "unknown_command",
];

pub const EN: &[(&str, &str)] = &[
    ("html_lang", "en"),
    (
        "subtitle",
        "Secure remote control – instant actions and live lock status.",
    ),
    ("bridge_label", "Bridge:"),
    ("error_keyword", "Error"),
    ("lock_state_title", "Lock state"),
    ("state_details_title", "State details"),
    ("state_details_subtitle", "Technical view"),
    ("lock_label", "Lock"),
    ("door_label", "Door"),
    ("battery_label", "Battery"),
    ("last_update_label", "Last update"),
    ("reading_state", "Reading state…"),
    ("refresh_state", "Refresh state"),
    ("btn_lock", "Lock"),
    ("btn_unlock", "Unlock"),
    ("btn_unlatch", "Open door"),
    ("btn_lockngo", "Lock'n'Go"),
    (
        "normalized_json_summary",
        "Normalized JSON (for debug / integrations)",
    ),
    ("footer_http_api", "HTTP API"),
    ("summary_lock_prefix", "Lock: "),
    ("summary_lock_state_prefix", "Lock: state="),
    ("summary_door_prefix", "Door: "),
    ("summary_door_state_prefix", "Door: doorState="),
    ("summary_batt_prefix", "Battery: "),
    ("summary_batt_critical_prefix", "Battery critical: "),
    ("summary_last_update_prefix", "Last update: "),
    ("no_state_data", "No state data available"),
    ("error_prefix", "Error: "),
    ("js_error_prefix", "JS error: "),
    ("critical_label", "Critical"),
    ("ok_label", "OK"),
    ("date_locale", "en-GB"),
    ("lang_en_label", "EN"),
    ("lang_it_label", "IT"),
    ("action_ok", "OK"),
    ("bridge_response_prefix", "Bridge response: "),
    ("unknown_command", "unknown command."),
];

pub const IT: &[(&str, &str)] = &[
    ("html_lang", "it"),
    (
        "subtitle",
        "Controllo remoto sicuro – azioni immediate e stato live della serratura.",
    ),
    ("bridge_label", "Bridge:"),
    ("error_keyword", "Errore"),
    ("lock_state_title", "Stato serratura"),
    ("state_details_title", "Dettagli stato"),
    ("state_details_subtitle", "Vista tecnica"),
    ("lock_label", "Serratura"),
    ("door_label", "Porta"),
    ("battery_label", "Batteria"),
    ("last_update_label", "Ultimo aggiornamento"),
    ("reading_state", "Lettura stato in corso…"),
    ("refresh_state", "Aggiorna stato"),
    ("btn_lock", "Chiudi"),
    ("btn_unlock", "Sblocca"),
    ("btn_unlatch", "Apri porta"),
    ("btn_lockngo", "Lock'n'Go"),
    (
        "normalized_json_summary",
        "JSON normalizzato (per debug / integrazioni)",
    ),
    ("footer_http_api", "HTTP API"),
    ("summary_lock_prefix", "Serratura: "),
    ("summary_lock_state_prefix", "Serratura: state="),
    ("summary_door_prefix", "Porta: "),
    ("summary_door_state_prefix", "Porta: doorState="),
    ("summary_batt_prefix", "Batteria: "),
    ("summary_batt_critical_prefix", "Batteria critica: "),
    ("summary_last_update_prefix", "Ultimo aggiornamento: "),
    ("no_state_data", "Nessun dato di stato disponibile"),
    ("error_prefix", "Errore: "),
    ("js_error_prefix", "Errore JS: "),
    ("critical_label", "Critica"),
    ("ok_label", "OK"),
    ("date_locale", "it-IT"),
    ("lang_en_label", "EN"),
    ("lang_it_label", "IT"),
    ("action_ok", "OK"),
    ("bridge_response_prefix", "Risposta bridge: "),
    ("unknown_command", "comando sconosciuto."),
];
