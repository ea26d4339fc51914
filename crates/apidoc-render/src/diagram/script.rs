//! Scoped stylesheet and client runtime embedded in every diagram fragment.
//!
//! The script is an IIFE: it looks up its root by the scoped id, reads its configuration from
//! a JSON literal and only ever queries inside the root. It ports [`super::runtime`] and
//! [`super::geometry`] one to one.

use super::runtime::PopupState;
use crate::markup::Markup;
use apidoc_core::{DiagramDecl, DiagramSettings};
use serde_json::json;

const ROOT: &str = "%ROOT%";

const STYLE: &str = r#"
%ROOT% { position:relative; width:100%; padding:20px 10px; box-sizing:border-box; font-family:'Inter','Segoe UI',system-ui,sans-serif; }
%ROOT% * { box-sizing:border-box; }
%ROOT% .node { position:absolute; border-radius:12px; padding:14px 18px; text-align:center; cursor:pointer; transition:transform .15s,box-shadow .15s; z-index:2; min-width:130px; color:#fff; font-weight:600; }
%ROOT% .node:hover { transform:translateY(-3px); box-shadow:0 8px 24px rgba(0,0,0,.15); }
%ROOT% .node-actor { background:linear-gradient(135deg,#2563EB,#1D4ED8); font-size:.92rem; }
%ROOT% .node-data { background:linear-gradient(135deg,#475569,#334155); font-size:.88rem; }
%ROOT% .node-sub { font-size:.72rem; font-weight:400; margin-top:2px; }
%ROOT% .node-actor .node-sub { color:#BFDBFE; }
%ROOT% .node-data .node-sub { color:#CBD5E1; }
%ROOT% .arrows { position:absolute; top:0; left:0; width:100%; height:100%; z-index:1; pointer-events:none; overflow:visible; }
%ROOT% .arrow-line { stroke:#94A3B8; stroke-width:2; fill:none; }
%ROOT% .arrow-label { font-size:11px; fill:#64748B; text-anchor:middle; }
%ROOT% .popup { display:none; position:absolute; background:#fff; border:1px solid #E2E8F0; border-radius:10px; box-shadow:0 12px 40px rgba(0,0,0,.18); padding:16px; z-index:100; min-width:320px; overflow-y:auto; }
%ROOT% .popup.visible { display:block; }
%ROOT% .popup-title { font-size:1rem; font-weight:700; color:#0F172A; margin-bottom:4px; }
%ROOT% .popup-path { font-family:'JetBrains Mono',monospace; font-size:.75rem; color:#64748B; margin-bottom:8px; }
%ROOT% .popup-group { margin-bottom:8px; }
%ROOT% .popup-sub { font-size:.78rem; font-weight:600; color:#475569; margin-bottom:3px; border-bottom:1px solid #E2E8F0; padding-bottom:2px; }
%ROOT% .popup-endpoint { display:flex; align-items:center; gap:6px; padding:3px 6px; border-radius:4px; text-decoration:none; color:#334155; font-size:.78rem; }
%ROOT% .popup-endpoint:hover { background:#F1F5F9; }
%ROOT% .mbadge { display:inline-block; padding:1px 6px; border-radius:3px; font-weight:700; font-size:.65rem; font-family:'JetBrains Mono',monospace; min-width:42px; text-align:center; background:#F1F5F9; color:#334155; }
%ROOT% .mbadge.method-get { background:#DCFCE7; color:#166534; }
%ROOT% .mbadge.method-post { background:#DBEAFE; color:#1E40AF; }
%ROOT% .mbadge.method-put { background:#FEF3C7; color:#92400E; }
%ROOT% .mbadge.method-patch { background:#FFEDD5; color:#9A3412; }
%ROOT% .mbadge.method-delete { background:#FEE2E2; color:#991B1B; }
%ROOT% .ep-path { font-family:'JetBrains Mono',monospace; font-size:.72rem; color:#475569; }
%ROOT% .popup-table { width:100%; border-collapse:collapse; font-size:.78rem; }
%ROOT% .popup-table th { text-align:left; padding:4px 6px; background:#F1F5F9; color:#475569; font-weight:600; border-bottom:2px solid #E2E8F0; }
%ROOT% .popup-table td { padding:3px 6px; border-bottom:1px solid #E2E8F0; }
%ROOT% .f-name { font-family:'JetBrains Mono',monospace; color:#1D4ED8; font-size:.75rem; }
%ROOT% .f-type { font-family:'JetBrains Mono',monospace; color:#64748B; font-size:.72rem; }
%ROOT% .f-desc { color:#475569; }
"#;

const SCRIPT: &str = r#"
(function () {
  var cfg = %CONFIG%;
  var root = document.getElementById(cfg.root);
  if (!root) return;
  var SVG_NS = 'http://www.w3.org/2000/svg';
  var svg = root.querySelector('svg.arrows');
  var nodes = {};
  var popups = {};
  root.querySelectorAll('.node').forEach(function (el) { nodes[el.getAttribute('data-node')] = el; });
  root.querySelectorAll('.popup').forEach(function (el) { popups[el.getAttribute('data-node')] = el; });

  function box(el) {
    var r = el.getBoundingClientRect();
    var c = root.getBoundingClientRect();
    return { x: r.left - c.left + r.width / 2, y: r.top - c.top + r.height / 2, hw: r.width / 2, hh: r.height / 2 };
  }

  function boundary(b, tx, ty) {
    var dx = tx - b.x, dy = ty - b.y;
    if (dx === 0 && dy === 0) return { x: b.x, y: b.y };
    if (Math.abs(dx) * b.hh >= Math.abs(dy) * b.hw) {
      var w = dx < 0 ? -b.hw : b.hw;
      return { x: b.x + w, y: b.y + w * dy / dx };
    }
    var h = dy < 0 ? -b.hh : b.hh;
    return { x: b.x + h * dx / dy, y: b.y + h };
  }

  function labelAnchor(s, e) {
    var mx = (s.x + e.x) / 2, my = (s.y + e.y) / 2;
    var dx = e.x - s.x, dy = e.y - s.y;
    var len = Math.sqrt(dx * dx + dy * dy);
    if (len === 0) return { x: mx, y: my - cfg.labelOffset };
    var nx = -dy / len, ny = dx / len;
    if (ny > 0 || (ny === 0 && nx < 0)) { nx = -nx; ny = -ny; }
    return { x: mx + nx * cfg.labelOffset, y: my + ny * cfg.labelOffset };
  }

  function redraw() {
    if (!svg) return;
    svg.querySelectorAll('.arrow-g').forEach(function (g) { g.remove(); });
    cfg.edges.forEach(function (edge) {
      var a = nodes[edge[0]], b = nodes[edge[1]];
      if (!a || !b) return;
      var fa = box(a), fb = box(b);
      var s = boundary(fa, fb.x, fb.y);
      var e = boundary(fb, fa.x, fa.y);
      var g = document.createElementNS(SVG_NS, 'g');
      g.setAttribute('class', 'arrow-g');
      var line = document.createElementNS(SVG_NS, 'line');
      line.setAttribute('class', 'arrow-line');
      line.setAttribute('x1', s.x);
      line.setAttribute('y1', s.y);
      line.setAttribute('x2', e.x);
      line.setAttribute('y2', e.y);
      line.setAttribute('marker-end', 'url(#' + cfg.marker + ')');
      g.appendChild(line);
      if (edge[2]) {
        var p = labelAnchor(s, e);
        var text = document.createElementNS(SVG_NS, 'text');
        text.setAttribute('class', 'arrow-label');
        text.setAttribute('x', p.x);
        text.setAttribute('y', p.y);
        text.textContent = edge[2];
        g.appendChild(text);
      }
      svg.appendChild(g);
    });
  }

  var active = null;
  var hoverNode = {};
  var hoverPopup = false;
  var seq = 0;

  function place(el, popup) {
    var n = el.getBoundingClientRect();
    var c = root.getBoundingClientRect();
    var left = n.left - c.left, top = n.top - c.top;
    var x = left + n.width + cfg.gutter;
    var side = 'right';
    if (x + cfg.popupWidth > c.width) {
      x = left - cfg.gutter - cfg.popupWidth;
      side = 'left';
    }
    x = Math.min(Math.max(x, 0), Math.max(0, c.width - cfg.popupWidth));
    var y = Math.min(Math.max(top, 0), Math.max(0, c.height - cfg.popupHeight));
    popup.style.left = x + 'px';
    popup.style.top = y + 'px';
    popup.setAttribute('data-side', side);
  }

  function hide(a) {
    a.popup.classList.remove('visible');
    if (active === a) active = null;
  }

  function scheduleHide(id) {
    if (!active || active.node !== id || active.state !== '%SHOWING%') return;
    var timer = ++seq;
    active.state = '%PENDING%';
    active.timer = timer;
    setTimeout(function () { fire(timer); }, cfg.graceMs);
  }

  function fire(timer) {
    if (!active || active.timer !== timer) return;
    active.timer = null;
    if (active.state !== '%PENDING%') return;
    if (hoverNode[active.node] || hoverPopup) {
      active.state = '%SHOWING%';
      return;
    }
    hide(active);
  }

  function cancelHide() {
    if (active.state === '%PENDING%') {
      active.state = '%SHOWING%';
      active.timer = null;
    }
  }

  function enterNode(id) {
    hoverNode[id] = true;
    if (active && active.node === id) { cancelHide(); return; }
    if (active) { hoverPopup = false; hide(active); }
    var el = nodes[id], popup = popups[id];
    if (!el || !popup) return;
    place(el, popup);
    popup.classList.add('visible');
    active = { node: id, popup: popup, state: '%SHOWING%', timer: null };
  }

  function leaveNode(id) {
    hoverNode[id] = false;
    if (!hoverPopup) scheduleHide(id);
  }

  function enterPopup(id) {
    if (!active || active.node !== id) return;
    hoverPopup = true;
    cancelHide();
  }

  function leavePopup(id) {
    if (!active || active.node !== id) return;
    hoverPopup = false;
    if (!hoverNode[id]) scheduleHide(id);
  }

  Object.keys(nodes).forEach(function (id) {
    nodes[id].addEventListener('mouseenter', function () { enterNode(id); });
    nodes[id].addEventListener('mouseleave', function () { leaveNode(id); });
  });
  Object.keys(popups).forEach(function (id) {
    popups[id].addEventListener('mouseenter', function () { enterPopup(id); });
    popups[id].addEventListener('mouseleave', function () { leavePopup(id); });
  });

  redraw();
  window.addEventListener('resize', redraw);
  setTimeout(redraw, cfg.settleMs);
})();
"#;

pub fn marker_id(scope_id: &str) -> String {
    format!("{scope_id}-arrowhead")
}

pub fn style(scope_id: &str) -> Markup {
    Markup::trusted(format!(
        "<style>{}</style>",
        STYLE.replace(ROOT, &format!("#{scope_id}"))
    ))
}

/// Client configuration. `</` is escaped so catalog strings cannot close the script element.
pub fn config_json(
    scope_id: &str,
    decl: &DiagramDecl,
    settings: &DiagramSettings,
) -> crate::Result<String> {
    let edges: Vec<serde_json::Value> = decl
        .edges
        .iter()
        .map(|e| json!([e.from, e.to, e.label.as_deref().unwrap_or("")]))
        .collect();
    let cfg = json!({
        "root": scope_id,
        "marker": marker_id(scope_id),
        "edges": edges,
        "gutter": settings.gutter,
        "popupWidth": settings.popup_width,
        "popupHeight": settings.popup_height,
        "graceMs": settings.grace.as_millis() as u64,
        "settleMs": settings.settle.as_millis() as u64,
        "labelOffset": settings.label_offset,
    });
    Ok(serde_json::to_string(&cfg)?.replace("</", "<\\/"))
}

fn script_source(cfg: &str) -> String {
    SCRIPT
        .replace("%CONFIG%", cfg)
        .replace("%SHOWING%", PopupState::Showing.as_str())
        .replace("%PENDING%", PopupState::PendingHide.as_str())
}

pub fn script(scope_id: &str, decl: &DiagramDecl, settings: &DiagramSettings) -> crate::Result<Markup> {
    let cfg = config_json(scope_id, decl, settings)?;
    Ok(Markup::trusted(format!("<script>{}</script>", script_source(&cfg))))
}
