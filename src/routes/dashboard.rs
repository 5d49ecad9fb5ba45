use axum::{
    http::header,
    response::{Html, IntoResponse},
};

/// Page hosting the chart. All state lives server-side; the page only
/// forwards clicks and redraws from `/api/chart/option`.
pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Temperature Time Series</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; margin: 0; padding: 1.5rem; color: #1e293b; }
        #controls { display: flex; flex-wrap: wrap; gap: 0.75rem; align-items: center; margin-bottom: 1rem; }
        #record-count { padding: 5px; background: #f0f0f0; border-radius: 3px; font-family: monospace; }
        #checkboxes label { margin-right: 0.75rem; }
        #main { width: 100%; height: 640px; }
        button { padding: 0.4rem 0.9rem; border: 1px solid #e2e8f0; border-radius: 0.375rem; background: #fff; cursor: pointer; }
    </style>
    <script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
</head>
<body>
    <div id="controls">
        <div id="record-count"></div>
        <div id="zone"></div>
        <button id="dayBtn">Day</button>
        <button id="weekBtn">Week</button>
        <button id="monthBtn">Month</button>
        <button id="downloadCsv">Download CSV</button>
        <label for="addDeviceSelect">Add device:</label>
        <select id="addDeviceSelect"><option value="">Select a device...</option></select>
    </div>
    <div id="checkboxes"></div>
    <div id="main"></div>
<script>
const api = (url, opts) => fetch(url, opts).then(async r => {
    const body = await r.json();
    if (!r.ok) throw new Error(body.error || r.statusText);
    return body;
});
const post = url => api(url, { method: 'POST' });

const target = document.getElementById('main');
const chart = target ? echarts.init(target) : null;

async function redraw() {
    if (!chart) return;
    const cfg = await api('/api/chart/option');
    cfg.option.tooltip.formatter = params => {
        // Values are display-zone wall clock encoded as UTC.
        let out = `${echarts.time.format(params[0].value[0], cfg.tooltipTimeTemplate, true)}<br>`;
        for (const p of params) {
            out += `${p.marker} ${p.seriesName}: ${p.value[1]} ${cfg.valueUnit}<br>`;
        }
        return out;
    };
    const zone = document.getElementById('zone');
    if (zone) zone.textContent = `UTC${cfg.utcOffset}`;
    chart.setOption(cfg.option, cfg.notMerge);
}

function renderState(state) {
    const count = document.getElementById('record-count');
    if (count) count.textContent = `Records loaded: ${state.record_count}`;

    const boxes = document.getElementById('checkboxes');
    if (!boxes) return;
    boxes.innerHTML = '';
    if (!state.toggles_enabled) return;
    state.series.forEach(s => {
        const cb = document.createElement('input');
        cb.type = 'checkbox';
        cb.id = `checkbox-${s.index}`;
        cb.checked = s.visible;
        cb.addEventListener('change', () => act(post(`/api/chart/series/${s.index}/toggle`)));
        const label = document.createElement('label');
        label.htmlFor = cb.id;
        label.innerText = s.name;
        boxes.append(cb, label);
    });
}

async function refreshDevices() {
    const select = document.getElementById('addDeviceSelect');
    if (!select) return;
    const options = await api('/api/chart/devices').catch(() => []);
    select.innerHTML = '<option value="">Select a device...</option>';
    options.forEach(d => {
        const opt = document.createElement('option');
        opt.value = d.device_id;
        opt.textContent = d.label;
        select.appendChild(opt);
    });
}

async function act(request) {
    try {
        renderState(await request);
        await redraw();
    } catch (e) {
        console.error('Chart update failed:', e);
    }
}

document.getElementById('dayBtn')?.addEventListener('click', () => act(post('/api/chart/window/day')));
document.getElementById('weekBtn')?.addEventListener('click', () => act(post('/api/chart/window/week')));
document.getElementById('monthBtn')?.addEventListener('click', () => act(post('/api/chart/window/month')));
document.getElementById('addDeviceSelect')?.addEventListener('change', async function () {
    const id = parseInt(this.value);
    this.value = '';
    if (id) {
        await act(post(`/api/chart/devices/${id}`));
        await refreshDevices();
    }
});
document.getElementById('downloadCsv')?.addEventListener('click', async () => {
    const r = await fetch('/api/chart/export.csv');
    if (!r.ok) {
        const body = await r.json().catch(() => ({}));
        alert(body.error || 'No data to export');
        return;
    }
    const link = document.createElement('a');
    link.href = URL.createObjectURL(await r.blob());
    link.download = 'temperature_data.csv';
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
});

act(post('/api/chart/reload'));
refreshDevices();
</script>
</body>
</html>
"##;
