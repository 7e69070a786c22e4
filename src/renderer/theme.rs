// Presentation rules embedded in decorated documents

pub const STYLESHEET: &str = r#":root {
  --bg: #fdfdfd;
  --fg: #24292e;
  --keyword: #d73a49;
  --entity: #6f42c1;
  --column: #24292e;
  --type: #005cc5;
  --value: #032f62;
  --comment: #6a737d;
  --nullable: #e36209;
}
[data-theme="dark"] {
  --bg: #1e1e1e;
  --fg: #d4d4d4;
  --keyword: #569cd6;
  --entity: #4ec9b0;
  --column: #9cdcfe;
  --type: #c586c0;
  --value: #ce9178;
  --comment: #6a9955;
  --nullable: #dcdcaa;
}
body {
  margin: 0;
  padding: 1.5rem;
  background: var(--bg);
  color: var(--fg);
}
pre.schema {
  font-family: ui-monospace, "SFMono-Regular", Menlo, Consolas, monospace;
  font-size: 14px;
  line-height: 1.4;
}
.keyword, .property, .rule { color: var(--keyword); }
.table-name, .enum-name, .reference { color: var(--entity); font-weight: bold; }
.column-name { color: var(--column); }
.data-type { color: var(--type); }
.enum-label, .default-value { color: var(--value); }
.comment { color: var(--comment); font-style: italic; }
.nullable { color: var(--nullable); cursor: help; }
.punctuation { color: var(--fg); }
#theme-toggle {
  position: fixed;
  top: 1rem;
  right: 1rem;
  padding: 0.4rem 0.8rem;
  border: 1px solid var(--comment);
  border-radius: 4px;
  background: var(--bg);
  color: var(--fg);
  cursor: pointer;
}
"#;

pub const THEME_TOGGLE_SCRIPT: &str = r#"(function () {
  var root = document.documentElement;
  var saved = window.localStorage.getItem("schemadoc-theme");
  if (saved === "light" || saved === "dark") {
    root.setAttribute("data-theme", saved);
  }
  document.getElementById("theme-toggle").addEventListener("click", function () {
    var next = root.getAttribute("data-theme") === "dark" ? "light" : "dark";
    root.setAttribute("data-theme", next);
    window.localStorage.setItem("schemadoc-theme", next);
  });
})();
"#;
