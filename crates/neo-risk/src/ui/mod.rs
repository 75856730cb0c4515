pub async fn index() -> axum::response::Html<&'static str> {
    axum::response::Html(
        r#"
<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>NEO Risk</title>
  <style>
    :root {
      --bg: #0b1220;
      --card: #131d33;
      --line: #263551;
      --text: #e5ecff;
      --muted: #9eb0d6;
      --accent: #5cc8ff;
      --low: #41d38a;
      --moderate: #f7d155;
      --high: #f79155;
      --critical: #ff5c6c;
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      font-family: Inter, Segoe UI, Roboto, sans-serif;
      background: radial-gradient(circle at 15% -10%, #1f3566, var(--bg));
      color: var(--text);
    }
    .container { max-width: 1200px; margin: 0 auto; padding: 24px; }
    .header { display: flex; justify-content: space-between; align-items: center; gap: 16px; }
    .title { margin: 0; font-size: 1.9rem; }
    .subtitle { margin: 8px 0 0; color: var(--muted); }
    .grid { display: grid; gap: 16px; margin-top: 20px; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); }
    .card {
      background: color-mix(in oklab, var(--card) 94%, black);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 16px;
      box-shadow: 0 10px 35px rgba(0,0,0,.18);
    }
    .metric { font-size: 2rem; margin: 8px 0; color: var(--accent); }
    .row { display: grid; grid-template-columns: 320px 1fr; gap: 16px; margin-top: 16px; }
    label { display: block; margin: 10px 0 6px; color: var(--muted); font-size: .9rem; }
    input, select, button {
      width: 100%; border-radius: 10px; border: 1px solid var(--line); background: #0d1629;
      color: var(--text); padding: 10px 12px;
    }
    button { background: linear-gradient(90deg, #1b7cff, #2ca0ff); border: none; font-weight: 600; cursor: pointer; margin-top: 8px; }
    .status { margin-top: 10px; color: var(--muted); font-size: .9rem; min-height: 22px; }
    table { width: 100%; border-collapse: collapse; font-size: .9rem; }
    th, td { padding: 8px 10px; border-bottom: 1px solid var(--line); text-align: left; }
    th { color: var(--muted); font-weight: 600; }
    .pill { border-radius: 999px; padding: 2px 9px; font-size: .78rem; border: 1px solid var(--line); }
    .pill.low { color: var(--low); }
    .pill.moderate { color: var(--moderate); }
    .pill.high { color: var(--high); }
    .pill.critical { color: var(--critical); }
    @media (max-width: 980px) { .row { grid-template-columns: 1fr; } }
  </style>
</head>
<body>
  <main class="container">
    <header class="header card">
      <div>
        <h1 class="title">NEO Risk</h1>
        <p class="subtitle">Near-earth objects, risk tiers and simulated impacts.</p>
      </div>
    </header>

    <section class="grid">
      <article class="card"><div>Tracked</div><div class="metric" id="total">0</div></article>
      <article class="card"><div>Hazardous</div><div class="metric" id="hazardous">0</div></article>
      <article class="card"><div>Critical</div><div class="metric" id="critical">0</div></article>
      <article class="card"><div>High</div><div class="metric" id="high">0</div></article>
      <article class="card"><div>Scenarios</div><div class="metric" id="scenarios">0</div></article>
    </section>

    <section class="row">
      <aside class="card">
        <h3>Ingest</h3>
        <label>Days ahead</label><input id="daysAhead" type="number" min="0" value="7"/>
        <button id="fetchBtn">Fetch feed</button>

        <h3 style="margin-top:22px">Impact scenario</h3>
        <label>Reference id</label><input id="neoId"/>
        <label>Latitude</label><input id="lat" type="number" value="40.7128"/>
        <label>Longitude</label><input id="lng" type="number" value="-74.0060"/>
        <button id="simulateBtn">Simulate</button>
        <div class="status" id="status"></div>
      </aside>

      <article class="card">
        <h3>Objects</h3>
        <label>Risk</label>
        <select id="riskFilter">
          <option value="">all</option><option>low</option><option>moderate</option><option>high</option><option>critical</option>
        </select>
        <table><thead><tr><th>Id</th><th>Name</th><th>Diameter (km)</th><th>Risk</th></tr></thead><tbody id="neoBody"></tbody></table>
      </article>
    </section>
  </main>

<script>
const statusEl = document.getElementById('status');

const api = async (url, opts = {}) => {
  const headers = Object.assign({ 'Content-Type': 'application/json' }, opts.headers || {});
  const resp = await fetch(url, Object.assign({}, opts, { headers }));
  const data = await resp.json();
  if (!resp.ok) throw new Error(data.detail || resp.statusText);
  return data;
};

async function refreshAll() {
  const risk = document.getElementById('riskFilter').value;
  const [stats, neos] = await Promise.all([
    api('/api/stats'),
    api(risk ? `/api/asteroids?risk_level=${risk}` : '/api/asteroids'),
  ]);

  document.getElementById('total').textContent = stats.total_asteroids;
  document.getElementById('hazardous').textContent = stats.hazardous_asteroids;
  document.getElementById('critical').textContent = stats.critical_risk_count;
  document.getElementById('high').textContent = stats.high_risk_count;
  document.getElementById('scenarios').textContent = stats.total_scenarios;

  const body = document.getElementById('neoBody');
  body.replaceChildren(...neos.map(neoRow));
  if (!neos.length) {
    const empty = cell('No data');
    empty.colSpan = 4;
    body.replaceChildren(row([empty]));
  }
}

// Feed text goes in through textContent only, never as markup.
const cell = (text) => {
  const td = document.createElement('td');
  td.textContent = text;
  return td;
};

const row = (cells) => {
  const tr = document.createElement('tr');
  tr.append(...cells);
  return tr;
};

const RISK_LEVELS = ['low', 'moderate', 'high', 'critical'];

function neoRow(n) {
  const pill = document.createElement('span');
  pill.className = RISK_LEVELS.includes(n.risk_level) ? `pill ${n.risk_level}` : 'pill';
  pill.textContent = n.risk_level;
  const risk = document.createElement('td');
  risk.append(pill);
  return row([
    cell(n.neo_reference_id),
    cell(n.name),
    cell(Number(n.estimated_diameter.kilometers_max).toFixed(3)),
    risk,
  ]);
}

document.getElementById('fetchBtn').onclick = async () => {
  try {
    const days = document.getElementById('daysAhead').value;
    const report = await api(`/api/asteroids/fetch?days_ahead=${days}`);
    statusEl.textContent = `${report.message} (${report.date_range})`;
    await refreshAll();
  } catch (e) {
    statusEl.textContent = `Fetch failed: ${e.message}`;
  }
};

document.getElementById('simulateBtn').onclick = async () => {
  try {
    const s = await api('/api/impact-scenario', {
      method: 'POST',
      body: JSON.stringify({
        asteroid_neo_id: document.getElementById('neoId').value.trim(),
        impact_location: {
          lat: parseFloat(document.getElementById('lat').value),
          lng: parseFloat(document.getElementById('lng').value),
        },
      }),
    });
    statusEl.textContent = `${s.impact_energy_megatons.toFixed(1)} Mt, radius ${s.estimated_damage_radius_km.toFixed(1)} km, ~${s.estimated_casualties} casualties`;
    await refreshAll();
  } catch (e) {
    statusEl.textContent = `Simulation failed: ${e.message}`;
  }
};

document.getElementById('riskFilter').onchange = () => refreshAll().catch(e => statusEl.textContent = e.message);
refreshAll().catch(e => statusEl.textContent = e.message);
</script>
</body>
</html>
"#,
    )
}
