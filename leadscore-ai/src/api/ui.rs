//! Web UI - single-page lead analysis form

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Example messages offered on the landing page
pub const EXAMPLE_MESSAGES: [&str; 4] = [
    "Hi, I saw your ad and I'm very interested in your product. Could you please send more details?",
    "We need a solution for our inventory management. Can you provide pricing information?",
    "Not interested at this time, please remove me from your list.",
    "I'm the CTO of a mid-sized company and we're looking for an enterprise solution. Can we schedule a demo?",
];

/// GET /
///
/// Lead analysis form; submits to `POST /api/analyze-lead`
pub async fn root_page() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_timestamp = env!("BUILD_TIMESTAMP");

    let examples: String = EXAMPLE_MESSAGES
        .iter()
        .map(|m| {
            format!(
                r#"<div class="example-card" data-example="{0}">{0}</div>"#,
                html_escape(m)
            )
        })
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lead Score AI Agent</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
        }}
        .container {{ max-width: 900px; margin: 0 auto; padding: 20px; }}
        textarea {{
            width: 100%;
            min-height: 120px;
            background: #2a2a2a;
            color: #e0e0e0;
            border: 1px solid #3a3a3a;
            padding: 10px;
            font-size: 15px;
        }}
        button {{
            margin-top: 10px;
            padding: 10px 24px;
            background: #4a90d9;
            color: #fff;
            border: none;
            cursor: pointer;
        }}
        button:disabled {{ background: #555; cursor: wait; }}
        .examples {{ display: grid; grid-template-columns: 1fr 1fr; gap: 10px; margin: 20px 0; }}
        .example-card {{
            background: #2a2a2a;
            border: 1px solid #3a3a3a;
            padding: 10px;
            cursor: pointer;
            font-size: 14px;
        }}
        .example-card:hover {{ border-color: #4a90d9; }}
        #resultSection {{ display: none; margin-top: 20px; }}
        #resultSection.active {{ display: block; }}
        .scores {{ display: flex; gap: 20px; margin-bottom: 15px; }}
        .score-box {{ flex: 1; background: #2a2a2a; padding: 15px; text-align: center; }}
        .score-box .value {{ font-size: 28px; font-weight: bold; }}
        pre {{ background: #111; padding: 10px; overflow-x: auto; font-size: 13px; }}
        footer {{ color: #666; font-size: 12px; text-align: center; padding: 20px; font-family: 'Courier New', monospace; }}
    </style>
</head>
<body>
    <header>
        <h1>Lead Score AI Agent</h1>
        <p>Sentiment (30%) + AI judgment (70%) = composite lead score</p>
    </header>
    <div class="container">
        <form id="leadForm">
            <textarea id="leadMessage" placeholder="Paste a lead message..."></textarea>
            <button type="submit" id="analyzeBtn">Analyze Lead</button>
        </form>

        <h3 style="margin-top: 20px;">Examples</h3>
        <div class="examples">{examples}</div>

        <div id="resultSection">
            <div class="scores">
                <div class="score-box"><div>Sentiment</div><div class="value" id="sentimentScore">-</div></div>
                <div class="score-box"><div>AI Score</div><div class="value" id="aiScore">-</div></div>
                <div class="score-box"><div>Composite</div><div class="value" id="compositeScore">-</div></div>
            </div>
            <h3>Justification</h3>
            <p id="justification"></p>
            <h3 style="margin-top: 15px;">Raw JSON</h3>
            <pre id="jsonOutput"></pre>
        </div>
    </div>
    <footer>v{version} [{git_hash}] built {build_timestamp}</footer>
    <script>
        const form = document.getElementById('leadForm');
        const input = document.getElementById('leadMessage');
        const button = document.getElementById('analyzeBtn');

        document.querySelectorAll('.example-card').forEach(card => {{
            card.addEventListener('click', () => {{
                input.value = card.getAttribute('data-example');
                input.focus();
            }});
        }});

        form.addEventListener('submit', async (e) => {{
            e.preventDefault();
            const message = input.value.trim();
            if (!message) {{
                alert('Please enter a lead message to analyze.');
                return;
            }}
            button.disabled = true;
            button.textContent = 'Analyzing...';
            try {{
                const response = await fetch('/api/analyze-lead', {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    body: JSON.stringify({{ message }})
                }});
                const data = await response.json();
                if (!response.ok) {{
                    throw new Error(data.error || 'API request failed');
                }}
                document.getElementById('sentimentScore').textContent =
                    data.sentiment.label + ' (' + data.sentiment.compound_score.toFixed(2) + ')';
                document.getElementById('aiScore').textContent = data.ai_analysis.score + '/100';
                document.getElementById('compositeScore').textContent = data.composite_score + '/100';
                document.getElementById('justification').textContent = data.ai_analysis.justification;
                document.getElementById('jsonOutput').textContent = JSON.stringify(data, null, 2);
                document.getElementById('resultSection').classList.add('active');
            }} catch (err) {{
                alert('An error occurred while analyzing the lead: ' + err.message);
            }} finally {{
                button.disabled = false;
                button.textContent = 'Analyze Lead';
            }}
        }});
    </script>
</body>
</html>
"#
    );

    Html(html)
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}
