//! Typed wrappers around Plotly interop via `js_sys::eval()`.
//!
//! Plotly is loaded from its CDN as a global (`window.Plotly`). Rendering
//! polls until both Plotly and the container element exist, so callers can
//! fire and forget from an effect.

use fcst_core::plotly::PlotlyFigure;

/// Plotly build injected when the host page has not loaded one.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('FCST JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Escape a string for embedding inside a single-quoted JS literal.
pub fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Load Plotly once. Call at app startup.
///
/// Appends a `<script>` tag for [`PLOTLY_CDN`] unless `window.Plotly` is
/// already defined or the tag was added before.
pub fn init_plotly() {
    call_js(&format!(
        r#"
        (function() {{
            if (typeof window.Plotly !== 'undefined' || window.__fcstPlotlyRequested) return;
            window.__fcstPlotlyRequested = true;
            var s = document.createElement('script');
            s.src = '{src}';
            s.async = true;
            s.onload = function() {{ console.log('FCST Plotly loaded'); }};
            s.onerror = function(e) {{ console.error('[FCST] failed to load Plotly:', e); }};
            document.head.appendChild(s);
        }})();
        "#,
        src = escape_js(PLOTLY_CDN),
    ));
}

/// Render the forecast figure into `container_id` with `Plotly.newPlot`.
///
/// Uses a polling loop to wait for Plotly to load and the container DOM
/// element to exist before rendering.
pub fn render_forecast_chart(container_id: &str, figure: &PlotlyFigure) {
    let id = escape_js(container_id);
    let data = escape_js(&figure.data_json());
    let layout = escape_js(&figure.layout_json());
    let config = escape_js(&figure.config_json());
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof window.Plotly !== 'undefined' &&
                    document.getElementById('{id}')) {{
                    clearInterval(poll);
                    try {{
                        window.Plotly.newPlot('{id}', JSON.parse('{data}'), JSON.parse('{layout}'), JSON.parse('{config}'));
                    }} catch(e) {{ console.error('[FCST] Plotly.newPlot error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{id}'); if (el) {{ if (window.Plotly) window.Plotly.purge(el); el.innerHTML = ''; }}",
        id = escape_js(container_id)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js(r#"{"a":"it's"}"#), r#"{"a":"it\'s"}"#);
        assert_eq!(escape_js("a\\b\nc"), "a\\\\b\\nc");
        assert_eq!(escape_js("plain"), "plain");
    }
}
