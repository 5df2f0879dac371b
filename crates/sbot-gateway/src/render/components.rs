//! Shared HTML components used across all gateway pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use crate::qr::ScannableCode;

/// Inline CSS for all gateway pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#2f6fdf;--accent-hover:#1f56b8;--border:rgba(47,111,223,.18);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:560px;width:100%;flex:1;text-align:center}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}

h1{font-size:2rem;font-weight:800;letter-spacing:-.03em;margin:1.5rem 0 .5rem}
.lead{color:var(--fg2);font-size:1.05rem;margin-bottom:1.5rem}

.qr{width:260px;height:260px;margin:0 auto 1.25rem;display:block;background:#fff;border-radius:8px;padding:6px;color:#000}

.token{display:flex;align-items:center;gap:.5rem;max-width:100%;margin:0 auto 1.5rem;padding:.6rem .85rem;border:1px solid var(--border);border-radius:8px}
.token code{font-family:var(--mono);font-size:.85rem;color:var(--fg2);word-break:break-all;text-align:left;flex:1}
.copy-btn{background:none;border:1px solid var(--border);cursor:pointer;color:var(--fg2);padding:.25rem .6rem;border-radius:6px;font-size:.8rem;flex-shrink:0}
.copy-btn:hover{color:var(--accent);border-color:var(--accent)}

.steps{text-align:left;margin:0 auto 1.5rem;max-width:440px;color:var(--fg2);padding-left:1.25rem}
.steps li{margin:.35rem 0}

.button{display:inline-flex;align-items:center;gap:.5rem;padding:.55rem 1.1rem;background:var(--accent);color:#fff;border-radius:6px;font-size:.95rem;font-weight:500;text-decoration:none;transition:background .15s}
.button:hover{background:var(--accent-hover);text-decoration:none}

.message{text-align:left;border:1px solid var(--border);border-radius:10px;padding:1.25rem}
.message-meta{display:grid;grid-template-columns:auto 1fr;gap:.25rem .85rem;font-size:.85rem;margin-bottom:1rem}
.message-meta dt{color:var(--fg3)}
.message-meta dd{font-family:var(--mono);word-break:break-all}
.message-content{font-family:var(--mono);font-size:.82rem;line-height:1.55;white-space:pre-wrap;word-break:break-word;background:var(--bg);padding:.85rem;border-radius:6px;overflow-x:auto}

.footer{text-align:center;margin-top:1.5rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:560px}

@media(prefers-color-scheme:dark){
:root{--bg:#0b0d12;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#6ea0ff;--accent-hover:#9bbdff;--border:rgba(110,160,255,.22)}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5;word-break:break-word}
.error-page a{color:#2f6fdf}
@media(prefers-color-scheme:dark){
body{background:#0b0d12;color:#e0e0e8}
.error-page p{color:#aaa}
.error-page a{color:#6ea0ff}
}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles plus the one-line copy-to-clipboard script. Stylesheets and
/// images may also come from the static directory.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'self' 'unsafe-inline'; script-src 'unsafe-inline'; img-src 'self' data:; form-action 'none'; frame-ancestors 'none'";

/// Render the full HTML page shell with `<head>` and body content.
pub fn page_shell(title: &str, description: &str, body_content: Markup) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="stylesheet" href="/style.css";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (body_content) }
                footer class="footer" {
                    "Served by sbot-gateway " (env!("CARGO_PKG_VERSION"))
                }
            }
        }
    }
}

/// Render a QR code as an inline SVG.
pub fn qr_svg(code: &ScannableCode, label: &str) -> Markup {
    html! {
        svg class="qr" xmlns="http://www.w3.org/2000/svg"
            viewBox=(format!("0 0 {0} {0}", code.size))
            shape-rendering="crispEdges" role="img" aria-label=(label) {
            path d=(code.path) fill="currentColor" {}
        }
    }
}

/// Render a value in monospace with a copy button.
pub fn copy_field(value: &str) -> Markup {
    html! {
        div class="token" {
            code { (value) }
            button class="copy-btn" type="button" data-copy=(value)
                onclick="navigator.clipboard.writeText(this.dataset.copy)" {
                "Copy"
            }
        }
    }
}

/// Truncate a sigil key for display: first 12 chars + ... + last 8 chars.
pub fn truncate_key(key: &str) -> String {
    if key.len() <= 24 || !key.is_char_boundary(12) || !key.is_char_boundary(key.len() - 8) {
        return key.to_string();
    }
    format!("{}...{}", &key[..12], &key[key.len() - 8..])
}
