use crate::record::{PredictionRecord, TABLE_COLUMNS};
use crate::theme::{Palette, Theme};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

/// Self-contained report: records embedded as JSON and rendered
/// client-side with the same missing-value and icon rules as the terminal
/// table. The toggle persists the chosen mode in browser local storage;
/// `initial` seeds the very first visit from the CLI-side store.
pub fn render_html(records: &[PredictionRecord], initial: Theme) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);
    let light = Palette::for_theme(Theme::Light);
    let dark = Palette::for_theme(Theme::Dark);
    let header_cells: String = TABLE_COLUMNS
        .iter()
        .map(|c| format!("<th>{c}</th>"))
        .collect();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <meta name="theme-color" content="{meta_initial}"/>
  <title>Prediction Records</title>
  <style>
    :root {{
      --bg: {meta_light};
      --surface: #ffffff;
      --fg: #1c2430;
      --muted: #6c757d;
      --border: #d7dee4;
      --success: {light_success};
      --danger: {light_danger};
      --info: {light_info};
    }}
    body.dark-mode {{
      --bg: {meta_dark};
      --surface: #23233d;
      --fg: #e8e8f0;
      --muted: #9aa0b4;
      --border: #3a3a5c;
      --success: {dark_success};
      --danger: {dark_danger};
      --info: {dark_info};
    }}
    body {{ margin: 0; font-family: "Segoe UI", system-ui, sans-serif; background: var(--bg); color: var(--fg); transition: background 0.2s, color 0.2s; }}
    header {{ display: flex; align-items: center; justify-content: space-between; padding: 16px 24px; background: var(--surface); border-bottom: 1px solid var(--border); }}
    header h1 {{ font-size: 18px; margin: 0; }}
    #theme-toggle {{ border: 1px solid var(--border); background: var(--surface); color: var(--fg); border-radius: 6px; padding: 6px 12px; cursor: pointer; }}
    main {{ max-width: 1280px; margin: 24px auto; padding: 0 24px; }}
    #status {{ margin: 0 0 16px; color: var(--muted); }}
    .table-wrap {{ overflow-x: auto; }}
    table {{ width: 100%; border-collapse: collapse; background: var(--surface); border: 1px solid var(--border); }}
    th, td {{ padding: 10px 12px; border-bottom: 1px solid var(--border); text-align: left; font-size: 14px; white-space: nowrap; }}
    th {{ color: var(--muted); text-transform: uppercase; font-size: 11px; letter-spacing: 0.06em; }}
    td.notice {{ text-align: center; color: var(--muted); }}
    .success {{ color: var(--success); }}
    .danger {{ color: var(--danger); }}
  </style>
</head>
<body>
  <script type="application/json" id="records-data">{json}</script>
  <header>
    <h1>Prediction Records</h1>
    <button id="theme-toggle" type="button">Toggle theme</button>
  </header>
  <main>
    <p id="status"></p>
    <div class="table-wrap">
      <table>
        <thead><tr>{header_cells}</tr></thead>
        <tbody id="records-body"></tbody>
      </table>
    </div>
  </main>
  <script>
    (function() {{
      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }}

      function cellText(value) {{
        return value === null || value === undefined || value === '' ? 'N/A' : String(value);
      }}

      function predictionCell(code) {{
        if (code === 1) return '<span class="danger">&#9888; Malignant</span>';
        if (code === 0) return '<span class="success">&#10004; Benign</span>';
        return 'N/A';
      }}

      var meta = document.querySelector('meta[name="theme-color"]');
      function applyTheme(mode) {{
        if (mode === 'dark') {{
          document.body.classList.add('dark-mode');
          if (meta) meta.setAttribute('content', '{meta_dark}');
        }} else {{
          document.body.classList.remove('dark-mode');
          if (meta) meta.setAttribute('content', '{meta_light}');
        }}
      }}
      function toggleTheme() {{
        var next = document.body.classList.contains('dark-mode') ? 'light' : 'dark';
        localStorage.setItem('ov-theme', next);
        applyTheme(next);
      }}
      var stored = localStorage.getItem('ov-theme');
      applyTheme(stored === 'dark' || stored === 'light' ? stored : '{initial_theme}');
      document.getElementById('theme-toggle').addEventListener('click', toggleTheme);

      var records = JSON.parse(document.getElementById('records-data').textContent || '[]');
      var tbody = document.getElementById('records-body');
      var status = document.getElementById('status');

      if (records.length === 0) {{
        tbody.innerHTML = '<tr><td class="notice" colspan="{colspan}">No records found</td></tr>';
        status.textContent = 'No records found.';
        return;
      }}

      var rows = [];
      for (var i = 0; i < records.length; i++) {{
        var r = records[i];
        var cells = [
          cellText(r.username),
          cellText(r.mean_radius),
          cellText(r.mean_perimeter),
          cellText(r.mean_area),
          cellText(r.mean_concavity),
          cellText(r.mean_concave_points),
          cellText(r.worst_radius),
          cellText(r.worst_perimeter),
          cellText(r.worst_area),
          cellText(r.worst_concavity),
          cellText(r.worst_concave_points)
        ].map(function(v) {{ return '<td>' + escapeHtml(v) + '</td>'; }});
        cells.push('<td>' + predictionCell(r.prediction) + '</td>');
        rows.push('<tr>' + cells.join('') + '</tr>');
      }}
      tbody.innerHTML = rows.join('');
      status.textContent = records.length + ' record' + (records.length === 1 ? '' : 's') + ' loaded.';
    }})();
  </script>
</body>
</html>"####,
        json = json,
        header_cells = header_cells,
        colspan = TABLE_COLUMNS.len(),
        initial_theme = initial.as_str(),
        meta_initial = initial.meta_color(),
        meta_light = Theme::Light.meta_color(),
        meta_dark = Theme::Dark.meta_color(),
        light_success = light.success,
        light_danger = light.danger,
        light_info = light.info,
        dark_success = dark.success,
        dark_danger = dark.danger,
        dark_info = dark.info,
    );

    html.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Prediction;

    #[test]
    fn report_embeds_records_and_initial_theme() {
        let record = PredictionRecord {
            username: Some("ada".to_string()),
            prediction: Prediction::Malignant,
            ..Default::default()
        };
        let html = String::from_utf8(render_html(&[record], Theme::Dark)).unwrap();
        assert!(html.contains(r#"id="records-data">[{"#));
        assert!(html.contains(r#""username":"ada""#));
        assert!(html.contains(r#""prediction":1"#));
        assert!(html.contains(": 'dark');"));
        assert!(html.contains(Theme::Dark.meta_color()));
    }

    #[test]
    fn report_closes_script_tags_in_embedded_json() {
        let record = PredictionRecord {
            username: Some("</script><script>".to_string()),
            ..Default::default()
        };
        let html = String::from_utf8(render_html(&[record], Theme::Light)).unwrap();
        assert!(!html.contains("</script><script>"));
        assert!(html.contains(r#"<\/script>"#));
    }

    #[test]
    fn report_spans_every_column_for_the_empty_notice() {
        let html = String::from_utf8(render_html(&[], Theme::Light)).unwrap();
        assert!(html.contains(&format!("colspan=\"{}\"", TABLE_COLUMNS.len())));
        assert!(html.contains("No records found"));
    }
}
