//! Embedded companion page. `extract` writes it next to the dataset so the
//! output directory is a self-contained static site; `serve` also hands it
//! out at `/`. All filtering on the page is client-side over
//! `data/ambitions.json`, mirroring the engine in [crate::viewer::filter].

pub fn viewer_page() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Old World Ambitions</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 960px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 4px; }
    .controls { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0;
                display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 10px; }
    label { display: block; font-weight: 600; margin-bottom: 4px; font-size: 0.85rem; }
    select, input { width: 100%; padding: 6px; box-sizing: border-box; }
    .summary { margin: 10px 0; color: #555; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 10px 14px; margin: 8px 0; }
    .card.unavailable { opacity: 0.55; }
    .card h3 { margin: 0 0 4px; }
    .tier { color: #777; font-size: 0.85rem; margin-left: 8px; }
    .reason { color: #a33; font-size: 0.85rem; }
    .event { color: #557; font-size: 0.85rem; }
    .error { background: #fee; border: 1px solid #c99; border-radius: 8px; padding: 14px; }
    h2 { border-bottom: 1px solid #ddd; padding-bottom: 4px; margin-top: 24px; }
  </style>
</head>
<body>
  <h1>Old World Ambitions</h1>
  <p>Browse every ambition by nation, family classes, progress and category.</p>

  <div class="controls">
    <div><label for="nation">Nation</label><select id="nation"><option value="">Any</option></select></div>
    <div><label for="families">Family classes (multi)</label><select id="families" multiple size="4"></select></div>
    <div><label for="klass">Category</label><select id="klass"><option value="">All</option></select></div>
    <div><label for="search">Search</label><input id="search" placeholder="name, category, help text" /></div>
    <div><label for="min">Accepted (min)</label><select id="min"></select></div>
    <div><label for="max">Accepted (max)</label><select id="max"></select></div>
    <div><label for="showua">Unavailable</label><select id="showua"><option value="1">Show</option><option value="0">Hide</option></select></div>
  </div>

  <div id="content">Loading&hellip;</div>

  <script>
    let data = null;
    const el = id => document.getElementById(id);

    function option(select, value, label) {
      const o = document.createElement('option');
      o.value = value; o.textContent = label;
      select.appendChild(o);
    }

    function populate() {
      Object.values(data.nations).forEach(n => option(el('nation'), n.id, n.name));
      Object.values(data.familyClasses).forEach(fc => option(el('families'), fc.id, fc.name));
      Object.entries(data.ambitionClasses).forEach(([id, name]) => option(el('klass'), id, name));
      for (let i = 0; i <= 9; i++) { option(el('min'), i, i); option(el('max'), i, i); }
      el('max').value = 9;
    }

    function isNational(a) {
      return a.victoryEligible && a.minTier === 10 && a.maxTier === 10;
    }

    function availability(a, nation, families) {
      const reasons = [];
      const f = a.filters || {};
      if (f.nationPrereq && nation && f.nationPrereq !== nation) {
        reasons.push('Requires ' + (f.nationPrereqName || f.nationPrereq));
      }
      const preferred = f.familyClasses || [];
      if (preferred.length && families.length && !preferred.some(fc => families.includes(fc))) {
        reasons.push('Preferred by: ' + (f.familyClassNames || preferred).join(', '));
      }
      return { available: reasons.length === 0, reasons };
    }

    function matches(a, q) {
      if (!(a.maxTier >= q.min + 1 && a.minTier <= q.max + 1)) return false;
      if (q.klass !== null && a.ambitionClass !== q.klass) return false;
      if (!q.term) return true;
      const hay = [a.name, a.ambitionClassName, a.helpText || '']
        .concat((a.filters && a.filters.familyClassNames) || []);
      return hay.some(s => s.toLowerCase().includes(q.term));
    }

    function card(view) {
      const a = view.ambition;
      const div = document.createElement('div');
      div.className = 'card' + (view.availability.available ? '' : ' unavailable');
      const tier = a.minTier === a.maxTier ? 'tier ' + a.minTier : 'tiers ' + a.minTier + '–' + a.maxTier;
      let html = '<h3>' + a.name + '<span class="tier">' + a.ambitionClassName + ', ' + tier + '</span></h3>';
      if (a.helpText) html += '<div>' + a.helpText + '</div>';
      if (a.eventSource && a.eventSource.eventName) {
        html += '<div class="event">Event only: ' + a.eventSource.eventName + '</div>';
      }
      view.availability.reasons.forEach(r => { html += '<div class="reason">' + r + '</div>'; });
      div.innerHTML = html;
      return div;
    }

    function render() {
      const q = {
        min: Number(el('min').value) || 0,
        max: Number(el('max').value) || 0,
        klass: el('klass').value === '' ? null : Number(el('klass').value),
        term: el('search').value.trim().toLowerCase(),
        showUnavailable: el('showua').value === '1',
      };
      const nation = el('nation').value || null;
      const families = Array.from(el('families').selectedOptions).map(o => o.value);

      const regular = [], national = [];
      let totals = { r: 0, ra: 0, n: 0, na: 0 };
      data.ambitions.forEach(a => {
        if (!matches(a, q)) return;
        const nat = isNational(a);
        const av = availability(a, nation, families);
        if (nat) { totals.n++; if (av.available) totals.na++; }
        else { totals.r++; if (av.available) totals.ra++; }
        if (!av.available && !q.showUnavailable) return;
        (nat ? national : regular).push({ ambition: a, availability: av });
      });

      const order = (x, y) =>
        (y.availability.available - x.availability.available)
        || (x.ambition.minTier - y.ambition.minTier)
        || (x.ambition.name < y.ambition.name ? -1 : x.ambition.name > y.ambition.name ? 1 : 0);
      regular.sort(order); national.sort(order);

      const content = el('content');
      content.textContent = '';
      const summary = document.createElement('div');
      summary.className = 'summary';
      summary.textContent = totals.ra + ' available of ' + totals.r + ' total ambitions, '
        + totals.na + ' available of ' + totals.n + ' National Ambitions';
      content.appendChild(summary);
      regular.forEach(v => content.appendChild(card(v)));
      if (national.length) {
        const h = document.createElement('h2');
        h.textContent = 'National Ambitions';
        content.appendChild(h);
        national.forEach(v => content.appendChild(card(v)));
      }
    }

    fetch('data/ambitions.json')
      .then(r => { if (!r.ok) throw new Error('HTTP ' + r.status); return r.json(); })
      .then(d => { data = d; populate(); render(); })
      .catch(err => {
        el('content').innerHTML = '<div class="error">Unable to load ambitions data: '
          + err.message + '. Run the extractor to produce data/ambitions.json.</div>';
      });

    ['nation', 'families', 'klass', 'min', 'max', 'showua'].forEach(id =>
      el(id).addEventListener('change', render));
    el('search').addEventListener('input', render);
  </script>
</body>
</html>
"#
    .to_string()
}
