pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Reports</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 12px;
    }

    select,
    .upload {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.9rem;
      font-weight: 600;
      font-family: inherit;
      background: white;
      color: var(--accent-2);
      cursor: pointer;
    }

    input[type="file"] {
      display: none;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      font-family: inherit;
      color: #6b645d;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .report {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 16px;
    }

    .row {
      display: grid;
      gap: 6px;
    }

    .row .line {
      display: flex;
      justify-content: space-between;
      font-size: 0.95rem;
    }

    .row .name {
      font-weight: 600;
    }

    .row .figure {
      color: #6b645d;
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .card .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .card .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .card .value.done {
      color: #2d7a4b;
    }

    .card .value.missed {
      color: #c63b2b;
    }

    .empty {
      color: #8b857d;
      font-size: 0.95rem;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Habit Reports</h1>
        <p class="subtitle">Today is {{DATE}}.</p>
      </div>
      <div class="controls">
        <select id="range">
          <option value="7" selected>Last week</option>
          <option value="14">Last 2 weeks</option>
          <option value="30">Last month</option>
        </select>
        <label class="upload" for="habit-upload">Upload habits CSV</label>
        <input id="habit-upload" type="file" accept=".csv" data-kind="habit" />
        <label class="upload" for="health-upload">Upload health CSV</label>
        <input id="health-upload" type="file" accept=".csv" data-kind="health" />
      </div>
    </header>

    <div class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="completion" role="tab" aria-selected="true">Completion rates</button>
      <button class="tab" type="button" data-tab="streaks" role="tab" aria-selected="false">Streaks</button>
      <button class="tab" type="button" data-tab="health" role="tab" aria-selected="false">Health stats</button>
    </div>

    <section class="report" id="report"></section>

    <section>
      <h2>Today</h2>
      <div class="cards" id="today-grid"></div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Rates count every logged entry per day, so logging a habit twice can push a rate past 100%. Zero health readings are treated as missing measurements.</p>
  </main>

  <script>
    const reportEl = document.getElementById('report');
    const todayGridEl = document.getElementById('today-grid');
    const statusEl = document.getElementById('status');
    const rangeEl = document.getElementById('range');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let statsData = null;
    let activeTab = 'completion';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const esc = (text) =>
      String(text).replace(/[&<>"]/g, (ch) =>
        ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[ch]));

    const startFor = (days) => {
      const date = new Date();
      date.setDate(date.getDate() - Number(days));
      return date.toISOString().slice(0, 10);
    };

    const renderCompletion = () => {
      if (!statsData.habits.length) {
        reportEl.innerHTML = '<div class="empty">No habit data loaded yet.</div>';
        return;
      }
      reportEl.innerHTML = statsData.habits
        .map((habit) => `
          <div class="row">
            <div class="line">
              <span class="name">${esc(habit.key)}</span>
              <span class="figure">${habit.rate}%</span>
            </div>
            <div class="bar"><span style="width: ${Math.min(habit.rate, 100)}%"></span></div>
          </div>`)
        .join('');
    };

    const renderStreaks = () => {
      if (!statsData.habits.length) {
        reportEl.innerHTML = '<div class="empty">No habit data loaded yet.</div>';
        return;
      }
      reportEl.innerHTML = `<div class="cards">${statsData.habits
        .map((habit) => `
          <div class="card">
            <span class="label">${esc(habit.key)}</span>
            <span class="value">${habit.streak} days</span>
          </div>`)
        .join('')}</div>`;
    };

    const renderHealth = () => {
      if (!statsData.health.length) {
        reportEl.innerHTML = '<div class="empty">No health data loaded yet.</div>';
        return;
      }
      reportEl.innerHTML = statsData.health
        .map((log) => `
          <div class="row">
            <div class="line">
              <span class="name">${esc(log.key)}</span>
              <span class="figure">${log.rate}%</span>
            </div>
            <div class="line">
              <span class="figure">Min: ${log.min}</span>
              <span class="figure">Max: ${log.max}</span>
              <span class="figure">Avg: ${log.avg.toFixed(2)}</span>
            </div>
          </div>`)
        .join('');
    };

    const renderTodayGrid = () => {
      if (!statsData.habits.length) {
        todayGridEl.innerHTML = '<div class="empty">Nothing to show.</div>';
        return;
      }
      todayGridEl.innerHTML = statsData.habits
        .map((habit) => `
          <div class="card">
            <span class="label">${esc(habit.key)}</span>
            <span class="value ${habit.done_today ? 'done' : 'missed'}">${habit.done_today ? '&#10003; done' : '&#10007; not yet'}</span>
          </div>`)
        .join('');
    };

    const renderActiveTab = () => {
      if (!statsData) {
        return;
      }
      if (activeTab === 'streaks') {
        renderStreaks();
      } else if (activeTab === 'health') {
        renderHealth();
      } else {
        renderCompletion();
      }
      renderTodayGrid();
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderActiveTab();
    };

    const loadStats = async () => {
      const res = await fetch(`/api/stats?start=${startFor(rangeEl.value)}`);
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      statsData = await res.json();
      renderActiveTab();
    };

    const uploadFile = async (input) => {
      const file = input.files && input.files[0];
      if (!file) {
        return;
      }
      setStatus('Uploading...', 'info');
      const text = await file.text();
      const res = await fetch('/api/load', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ kind: input.dataset.kind, text })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Upload failed');
      }
      const loaded = await res.json();
      await loadStats();
      setStatus(`Loaded ${loaded.entries} entries across ${loaded.keys} keys`, 'ok');
      input.value = '';
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    rangeEl.addEventListener('change', () => {
      loadStats().catch((err) => setStatus(err.message, 'error'));
    });

    ['habit-upload', 'health-upload'].forEach((id) => {
      const input = document.getElementById(id);
      input.addEventListener('change', () => {
        uploadFile(input).catch((err) => setStatus(err.message, 'error'));
      });
    });

    loadStats().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
