use crate::season::{Mode, ModeSelection};

pub fn render_index(location: &str, selection: &ModeSelection) -> String {
    let mode_note = match selection.mode {
        Mode::Forecast => format!(
            "Using the {}-day forecast until spring starts on {}.",
            selection.window_days, selection.spring_start
        ),
        Mode::Historical => format!(
            "Spring started on {}; using recorded weather from {} to {}.",
            selection.spring_start, selection.date_range.start, selection.date_range.end
        ),
    };

    INDEX_HTML
        .replace("{{LOCATION}}", &escape_html(location))
        .replace("{{MODE_NOTE}}", &escape_html(&mode_note))
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Is the Groundhog Correct?</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;500;700&display=swap');

    :root {
      --bg: #eef2f7;
      --ink: #333;
      --accent: #2a9d8f;
      --accent-2: #264653;
      --warm: #e76f51;
      --error: #e63946;
      --card: #fff;
      --shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Roboto", sans-serif;
    }

    .app {
      max-width: 960px;
      margin: 0 auto;
      padding: 20px;
    }

    header {
      text-align: center;
      padding: 40px 20px;
      background: linear-gradient(135deg, var(--accent), var(--accent-2));
      color: #fff;
      border-radius: 8px;
      box-shadow: var(--shadow);
      margin-bottom: 30px;
    }

    header h1 {
      font-size: 2.8rem;
      margin: 0;
    }

    header p {
      font-size: 1.3rem;
      margin: 10px 0 20px;
    }

    .mode-note {
      font-size: 0.95rem;
      opacity: 0.85;
    }

    #location-form {
      display: flex;
      justify-content: center;
      align-items: center;
      margin-top: 20px;
    }

    #location-form input {
      padding: 10px;
      width: 250px;
      border: none;
      border-radius: 4px 0 0 4px;
      font-size: 1rem;
      outline: none;
    }

    #location-form button {
      padding: 10px 16px;
      border: none;
      border-radius: 0 4px 4px 0;
      background: var(--accent);
      color: #fff;
      font-size: 1rem;
      cursor: pointer;
    }

    .status {
      text-align: center;
      margin: 20px 0;
      font-size: 1.2rem;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: var(--error);
    }

    .prediction {
      background: var(--card);
      border-left: 6px solid var(--accent);
      border-radius: 8px;
      padding: 20px;
      margin: 30px 0;
      box-shadow: var(--shadow);
    }

    .prediction h2 {
      margin: 0;
      font-size: 2rem;
      color: var(--accent-2);
    }

    .prediction p {
      margin: 10px 0;
      font-size: 1.1rem;
    }

    .verdict {
      font-size: 1.3rem;
      font-weight: 700;
    }

    .verdict[data-correct="true"] {
      color: var(--accent);
    }

    .verdict[data-correct="false"] {
      color: var(--error);
    }

    .chart-card {
      margin: 40px 0;
      padding: 20px;
      background: var(--card);
      border-radius: 8px;
      box-shadow: var(--shadow);
    }

    .chart-card h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
      text-align: center;
    }

    #chart {
      width: 100%;
      height: 320px;
      display: block;
    }

    .series-high {
      fill: none;
      stroke: var(--warm);
      stroke-width: 2.5;
    }

    .series-low {
      fill: none;
      stroke: var(--accent-2);
      stroke-width: 2.5;
    }

    .series-threshold {
      fill: none;
      stroke: #aaa;
      stroke-width: 2;
      stroke-dasharray: 5 5;
    }

    .chart-grid {
      stroke: rgba(38, 70, 83, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .legend {
      display: flex;
      justify-content: center;
      gap: 18px;
      font-size: 0.85rem;
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 14px;
      height: 3px;
      margin-right: 6px;
      vertical-align: middle;
      background: currentColor;
    }

    .days {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(120px, 1fr));
      gap: 20px;
    }

    .day {
      background: var(--card);
      border-radius: 8px;
      padding: 15px;
      text-align: center;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    }

    .day h3 {
      margin: 0 0 10px;
      font-size: 1.1rem;
      color: var(--accent-2);
    }

    .day img {
      width: 64px;
      height: 64px;
    }

    .day p {
      margin: 5px 0;
    }

    footer {
      text-align: center;
      margin-top: 40px;
      padding-top: 20px;
      border-top: 1px solid #ccc;
      font-size: 0.9rem;
      color: #555;
    }

    footer a {
      color: var(--accent);
      text-decoration: none;
    }

    [hidden] {
      display: none !important;
    }

    @media (max-width: 600px) {
      .app {
        padding: 15px;
      }
      header h1 {
        font-size: 2rem;
      }
      #location-form {
        flex-direction: column;
      }
      #location-form input,
      #location-form button {
        width: 80%;
        border-radius: 4px;
        margin-bottom: 10px;
      }
      .days {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Is the Groundhog Correct?</h1>
      <p>Check if the groundhog's prediction is right for your area!</p>
      <p class="mode-note">{{MODE_NOTE}}</p>
      <form id="location-form">
        <input id="location-input" type="text" name="location" value="{{LOCATION}}" placeholder="Enter city or ZIP" />
        <button type="submit">See Forecast</button>
      </form>
    </header>

    <div class="status" id="status"></div>

    <section id="results" hidden>
      <section class="prediction">
        <h2 id="reference"></h2>
        <p id="derived"></p>
        <p id="verdict" class="verdict"></p>
        <p id="basis"></p>
      </section>

      <section class="chart-card">
        <h2 id="chart-title"></h2>
        <svg id="chart" viewBox="0 0 720 320" aria-label="Temperature chart" role="img"></svg>
        <div class="legend">
          <span style="color: var(--warm)">High Temperature (°F)</span>
          <span style="color: var(--accent-2)">Low Temperature (°F)</span>
          <span style="color: #aaa">50°F Threshold</span>
        </div>
      </section>

      <h2>Daily Weather</h2>
      <div class="days" id="days"></div>
    </section>

    <footer>
      <p>Data provided by <a href="https://www.weatherapi.com/" target="_blank" rel="noreferrer">WeatherAPI.com</a></p>
    </footer>
  </main>

  <script>
    const form = document.getElementById('location-form');
    const input = document.getElementById('location-input');
    const statusEl = document.getElementById('status');
    const resultsEl = document.getElementById('results');
    const chartEl = document.getElementById('chart');
    const daysEl = document.getElementById('days');

    let requestGeneration = 0;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      })[ch]);

    const renderLineChart = (chart) => {
      if (!chart.labels.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }

      const width = 720;
      const height = 320;
      const paddingX = 44;
      const paddingY = 40;
      const top = 20;

      const values = [...chart.highs, ...chart.lows, ...chart.threshold];
      let min = Math.floor(Math.min(...values) / 5) * 5;
      let max = Math.ceil(Math.max(...values) / 5) * 5;
      if (min === max) {
        min -= 5;
        max += 5;
      }
      const range = max - min;
      const count = chart.labels.length;
      const xStep = count > 1 ? (width - paddingX * 2) / (count - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const path = (series) => series
        .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');

      let grid = '';
      for (let value = min; value <= max; value += 5) {
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${value}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(count / 10));
      const xLabels = chart.labels
        .map((label, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${escapeHtml(label)}</text>`;
        })
        .join('');

      chartEl.innerHTML = `
        ${grid}
        <path class="series-threshold" d="${path(chart.threshold)}" />
        <path class="series-high" d="${path(chart.highs)}" />
        <path class="series-low" d="${path(chart.lows)}" />
        ${xLabels}
      `;
    };

    const renderDays = (days) => {
      daysEl.innerHTML = days
        .map((day) => `
          <div class="day">
            <h3>${escapeHtml(day.date)}</h3>
            <img src="${escapeHtml(day.condition_icon)}" alt="${escapeHtml(day.condition_text)}" />
            <p>${escapeHtml(day.condition_text)}</p>
            <p><strong>High:</strong> ${Math.round(day.max_temp_f)}°F</p>
            <p><strong>Low:</strong> ${Math.round(day.min_temp_f)}°F</p>
          </div>
        `)
        .join('');
    };

    const renderReport = (report) => {
      document.getElementById('reference').textContent = report.summary.reference;
      document.getElementById('derived').textContent = report.summary.derived;
      const verdictEl = document.getElementById('verdict');
      verdictEl.textContent = report.summary.verdict;
      verdictEl.dataset.correct = String(report.prediction.is_match);
      document.getElementById('basis').textContent = report.summary.basis;
      document.getElementById('chart-title').textContent = report.chart.title;
      renderLineChart(report.chart);
      renderDays(report.days);
      resultsEl.hidden = report.days.length === 0;
    };

    const load = async (location) => {
      const generation = ++requestGeneration;
      resultsEl.hidden = true;
      setStatus(`Loading weather data for ${location}...`, 'info');

      const res = await fetch('/api/location', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ location })
      });
      if (generation !== requestGeneration) {
        return;
      }
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Error loading weather data');
      }
      const report = await res.json();
      if (generation !== requestGeneration) {
        return;
      }
      setStatus('', '');
      renderReport(report);
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const location = input.value.trim();
      if (location === '') {
        return;
      }
      load(location).catch((err) => setStatus(err.message, 'error'));
    });

    if (input.value.trim() !== '') {
      load(input.value.trim()).catch((err) => setStatus(err.message, 'error'));
    }
  </script>
</body>
</html>
"#;
