//! Site-wide stylesheet shared by every page.

use crate::markup::Markup;

pub const GLOBAL_CSS: &str = r#"
:root {
  --primary: #2563EB;
  --primary-dark: #1D4ED8;
  --slate-50: #F8FAFC;
  --slate-100: #F1F5F9;
  --slate-200: #E2E8F0;
  --slate-500: #64748B;
  --slate-700: #334155;
  --slate-900: #0F172A;
  --radius-sm: 4px;
  --radius-md: 8px;
}
body { margin: 0; font-family: 'Inter', 'Segoe UI', system-ui, sans-serif; color: var(--slate-900); background: var(--slate-50); }
main { max-width: 1100px; margin: 0 auto; padding: 24px; }
.site-nav { display: flex; gap: 18px; align-items: center; padding: 12px 24px; background: #fff; border-bottom: 1px solid var(--slate-200); }
.site-nav a { color: var(--slate-700); text-decoration: none; font-weight: 600; }
.site-nav .site-title { color: var(--slate-900); margin-right: auto; }
.method-badge { display: inline-block; padding: 2px 10px; border-radius: var(--radius-sm); font-weight: 700; font-size: 0.72rem; font-family: 'JetBrains Mono', monospace; letter-spacing: 0.03em; line-height: 1.6; min-width: 56px; text-align: center; background: var(--slate-100); color: var(--slate-700); }
.method-get { background: #DCFCE7; color: #166534; }
.method-post { background: #DBEAFE; color: #1E40AF; }
.method-delete { background: #FEE2E2; color: #991B1B; }
.method-put { background: #FEF3C7; color: #92400E; }
.method-patch { background: #F3E8FF; color: #6B21A8; }
.endpoint-path { font-family: 'JetBrains Mono', monospace; font-size: 0.88rem; color: var(--slate-700); }
.auth-badge { display: inline-block; background: #FEF3C7; color: #92400E; padding: 2px 10px; border-radius: 12px; font-size: 0.7rem; font-weight: 500; }
.source-ref { margin-left: 10px; font-family: 'JetBrains Mono', monospace; font-size: 0.75rem; color: var(--slate-500); }
.endpoint-card { display: block; text-decoration: none; color: inherit; border: 1px solid var(--slate-200); border-radius: var(--radius-md); padding: 14px 18px; margin: 6px 0; background: #fff; transition: box-shadow 0.2s, border-color 0.2s; }
.endpoint-card:hover { box-shadow: 0 4px 14px rgba(0,0,0,0.08); border-color: var(--primary); }
.endpoint-card .card-head { display: flex; align-items: center; gap: 10px; flex-wrap: wrap; }
.endpoint-card .card-title { margin-top: 6px; font-size: 0.92rem; font-weight: 600; }
.endpoint-card .card-summary { margin-top: 2px; font-size: 0.82rem; color: var(--slate-500); }
.tag-header { font-size: 1.3rem; font-weight: 700; margin-top: 1.4rem; margin-bottom: 0.2rem; padding-bottom: 6px; border-bottom: 2px solid var(--primary); }
.tag-count { font-size: 0.8rem; font-weight: 400; color: var(--slate-500); }
.subcategory-header { font-size: 1rem; font-weight: 600; color: var(--slate-700); margin-top: 1rem; margin-bottom: 0.3rem; }
.stat-pills { margin: 8px 0 18px 0; }
.stat-pill { display: inline-flex; align-items: center; gap: 6px; padding: 4px 14px; border-radius: 20px; font-size: 0.82rem; font-weight: 600; background: var(--slate-100); color: var(--slate-700); margin-right: 8px; }
.stat-pill.stat-total { background: var(--primary); color: #fff; }
.listing-filters { display: flex; gap: 12px; margin-bottom: 12px; }
.listing-search { flex: 3; padding: 8px 12px; border: 1px solid var(--slate-200); border-radius: var(--radius-md); }
.listing-method { flex: 1; padding: 8px 12px; border: 1px solid var(--slate-200); border-radius: var(--radius-md); }
.listing-empty { padding: 12px 16px; background: var(--slate-100); border-radius: var(--radius-md); color: var(--slate-700); }
.schema-table { width: 100%; border-collapse: collapse; margin: 12px 0; font-size: 0.88rem; }
.schema-table th { background: var(--slate-100); text-align: left; padding: 8px 12px; font-weight: 600; color: var(--slate-700); border-bottom: 2px solid var(--slate-200); }
.schema-table td { padding: 6px 12px; border-bottom: 1px solid var(--slate-200); color: var(--slate-700); }
.schema-table .field-name { font-family: 'JetBrains Mono', monospace; font-size: 0.84rem; color: var(--primary-dark); }
.schema-table .field-type { font-family: 'JetBrains Mono', monospace; font-size: 0.82rem; color: var(--slate-500); }
.status-code { display: inline-block; padding: 1px 8px; border-radius: var(--radius-sm); font-family: 'JetBrains Mono', monospace; font-size: 0.8rem; font-weight: 600; }
.status-2xx { background: #DCFCE7; color: #166534; }
.status-4xx { background: #FEF3C7; color: #92400E; }
.status-5xx { background: #FEE2E2; color: #991B1B; }
.related-list { list-style: none; padding: 0; }
.related-endpoint { display: inline-flex; gap: 8px; align-items: center; text-decoration: none; color: var(--slate-700); padding: 3px 0; }
.back-link { display: inline-block; margin-bottom: 12px; color: var(--primary); text-decoration: none; font-weight: 600; }
.not-found { padding: 12px 16px; background: #FEE2E2; color: #991B1B; border-radius: var(--radius-md); }
.diagram-legend { display: flex; gap: 20px; margin-bottom: 12px; flex-wrap: wrap; font-size: 0.82rem; color: #475569; }
.legend-swatch { display: inline-block; width: 16px; height: 16px; border-radius: 4px; vertical-align: middle; margin-right: 6px; }
.legend-actor { background: linear-gradient(135deg, #2563EB, #1D4ED8); }
.legend-data { background: linear-gradient(135deg, #475569, #334155); }
.section-divider { border: none; border-top: 1px solid var(--slate-200); margin: 1.5rem 0; }
[hidden] { display: none !important; }
"#;

pub fn global_style() -> Markup {
    Markup::trusted(format!("<style>{GLOBAL_CSS}</style>"))
}
