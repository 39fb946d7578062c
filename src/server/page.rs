//! Page Renderer Module
//! Renders the view tree into a self-contained HTML page. Charts are drawn
//! by plotly.js (loaded from its CDN); the data table ships with a small
//! inline runtime for sorting, per-column filtering and 10-row paging.

use crate::view::DashboardView;

/// Render the dashboard page. The serialized view tree is embedded verbatim;
/// no endpoint beyond `/` is needed.
pub fn render_page(view: &DashboardView) -> Result<String, serde_json::Error> {
    let panels: String = view
        .panels
        .iter()
        .map(|panel| {
            format!(
                "<div class=\"panel\"><h3>{}</h3><p>{}</p></div>",
                panel.label, panel.value
            )
        })
        .collect();

    let chart_divs: String = view
        .charts
        .iter()
        .map(|chart| format!("<div class=\"chart\" id=\"{}\"></div>", chart.id))
        .collect();

    // "</" would terminate the inline script early if a cell contained
    // "</script>"; JSON allows the escaped form.
    let payload = serde_json::to_string(view)?.replace("</", "<\\/");

    Ok(PAGE_TEMPLATE
        .replace("__TITLE__", &view.title)
        .replace("__PANELS__", &panels)
        .replace("__CHART_DIVS__", &chart_divs)
        .replace("__VIEW_JSON__", &payload))
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="https://cdn.plot.ly/plotly-2.35.0.min.js"></script>
<style>
body { font-family: system-ui, -apple-system, sans-serif; max-width: 1400px; margin: 0 auto; padding: 20px; background: #fafafa; color: #1a1a2e; }
h1 { color: #1a1a2e; }
h2 { color: #16213e; border-bottom: 1px solid #ddd; padding-bottom: 5px; }
.panels { display: flex; justify-content: space-between; gap: 16px; }
.panel { flex: 1; background: #fff; border-radius: 8px; padding: 4px 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.panel h3 { margin: 12px 0 4px; font-size: 14px; color: #607d8b; }
.panel p { margin: 4px 0 12px; font-size: 24px; font-weight: 700; }
.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin-top: 20px; }
.chart { background: #fff; border-radius: 8px; padding: 10px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); height: 420px; }
table { width: 100%; border-collapse: collapse; background: #fff; font-size: 13px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #eee; }
th { cursor: pointer; user-select: none; background: #f4f6f8; }
th .arrow { color: #3498db; margin-left: 4px; }
.filter-row input { width: 95%; box-sizing: border-box; padding: 4px; border: 1px solid #ddd; border-radius: 4px; font-size: 12px; }
#pager { margin: 12px 0; display: flex; align-items: center; gap: 12px; }
#pager button { padding: 4px 12px; border: 1px solid #ddd; border-radius: 4px; background: #fff; cursor: pointer; }
#pager button:disabled { opacity: 0.4; cursor: default; }
</style>
</head>
<body>
<h1>__TITLE__</h1>
<div class="panels">__PANELS__</div>
<div class="charts">__CHART_DIVS__</div>
<h2>Property Data Table</h2>
<table id="data-table"><thead></thead><tbody></tbody></table>
<div id="pager"></div>
<script>
const VIEW = __VIEW_JSON__;

for (const chart of VIEW.charts) {
  const layout = Object.assign({ title: chart.title, margin: { t: 48 } }, chart.layout);
  Plotly.newPlot(chart.id, chart.traces, layout, { responsive: true, displayModeBar: false });
}

const table = VIEW.table;
const state = { sortCol: null, sortDir: 1, filters: {}, page: 0 };

// Numeric comparison when the expression starts with an operator and the
// cell is a number; case-insensitive substring match otherwise.
function rowMatches(row) {
  return table.columns.every(col => {
    const expr = (state.filters[col] || '').trim();
    if (!expr) return true;
    const cell = row[col];
    const m = expr.match(/^(>=|<=|>|<|=)\s*(-?[0-9.]+)$/);
    if (m && typeof cell === 'number') {
      const n = parseFloat(m[2]);
      switch (m[1]) {
        case '>': return cell > n;
        case '<': return cell < n;
        case '>=': return cell >= n;
        case '<=': return cell <= n;
        default: return cell === n;
      }
    }
    return String(cell ?? '').toLowerCase().includes(expr.toLowerCase());
  });
}

function visibleRows() {
  let rows = table.rows.filter(rowMatches);
  if (state.sortCol !== null) {
    const col = state.sortCol, dir = state.sortDir;
    rows = rows.slice().sort((a, b) => {
      const x = a[col], y = b[col];
      if (x == null && y == null) return 0;
      if (x == null) return 1;
      if (y == null) return -1;
      if (typeof x === 'number' && typeof y === 'number') return dir * (x - y);
      return dir * String(x).localeCompare(String(y));
    });
  }
  return rows;
}

function buildHead() {
  const thead = document.querySelector('#data-table thead');
  thead.innerHTML = '';
  const headerRow = document.createElement('tr');
  for (const col of table.columns) {
    const th = document.createElement('th');
    th.textContent = col;
    const arrow = document.createElement('span');
    arrow.className = 'arrow';
    arrow.dataset.col = col;
    th.appendChild(arrow);
    th.onclick = () => {
      if (state.sortCol === col) {
        state.sortDir = -state.sortDir;
      } else {
        state.sortCol = col;
        state.sortDir = 1;
      }
      state.page = 0;
      renderBody();
    };
    headerRow.appendChild(th);
  }
  thead.appendChild(headerRow);

  const filterRow = document.createElement('tr');
  filterRow.className = 'filter-row';
  for (const col of table.columns) {
    const td = document.createElement('td');
    const input = document.createElement('input');
    input.placeholder = 'filter...';
    input.oninput = () => {
      state.filters[col] = input.value;
      state.page = 0;
      renderBody();
    };
    td.appendChild(input);
    filterRow.appendChild(td);
  }
  thead.appendChild(filterRow);
}

function renderBody() {
  const rows = visibleRows();
  const pages = Math.max(1, Math.ceil(rows.length / table.page_size));
  state.page = Math.min(state.page, pages - 1);

  for (const arrow of document.querySelectorAll('#data-table .arrow')) {
    arrow.textContent = arrow.dataset.col === state.sortCol
      ? (state.sortDir === 1 ? '▲' : '▼')
      : '';
  }

  const tbody = document.querySelector('#data-table tbody');
  tbody.innerHTML = '';
  const start = state.page * table.page_size;
  for (const row of rows.slice(start, start + table.page_size)) {
    const tr = document.createElement('tr');
    for (const col of table.columns) {
      const td = document.createElement('td');
      td.textContent = row[col] ?? '';
      tr.appendChild(td);
    }
    tbody.appendChild(tr);
  }

  const pager = document.getElementById('pager');
  pager.innerHTML = '';
  const prev = document.createElement('button');
  prev.textContent = 'Previous';
  prev.disabled = state.page === 0;
  prev.onclick = () => { state.page--; renderBody(); };
  const next = document.createElement('button');
  next.textContent = 'Next';
  next.disabled = state.page >= pages - 1;
  next.onclick = () => { state.page++; renderBody(); };
  const label = document.createElement('span');
  label.textContent = 'Page ' + (state.page + 1) + ' of ' + pages + ' (' + rows.length + ' rows)';
  pager.append(prev, next, label);
}

buildHead();
renderBody();
</script>
</body>
</html>
"#;
