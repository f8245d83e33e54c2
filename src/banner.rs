//! Console banner printed once at load

/// (text, css) pairs for `console.log("%c...", css)`
pub const BANNER: [(&str, &str); 3] = [
    (
        "%c RumiStar E.I.R.L. ",
        "background: #10b981; color: white; font-size: 16px; font-weight: bold; padding: 4px 8px;",
    ),
    (
        "%c iTrade 3.0 - Sistema Enterprise de Lotización ",
        "background: #0a0e14; color: #10b981; font-size: 12px; padding: 4px 8px;",
    ),
    ("%c 171 empresas activas | 30 módulos | 55+ reportes ", "color: #94a3b8; font-size: 10px;"),
];

pub fn print() {
    for (text, style) in BANNER {
        web_sys::console::log_2(&text.into(), &style.into());
    }
}
