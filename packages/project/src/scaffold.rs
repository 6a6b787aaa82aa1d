//! The starter file set for a fresh project.

use stitch_vfs::File;

const STARTER_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>My Project</title>
    <link rel="stylesheet" href="style.css" />
  </head>
  <body>
    <main class="stage">
      <h1>Make something</h1>
      <p>Start editing the files on the left.</p>
      <button id="btn">Click me</button>
    </main>
    <script src="script.js"></script>
  </body>
</html>
"#;

const STARTER_CSS: &str = r#":root {
  color-scheme: light;
  font-family: "Trebuchet MS", sans-serif;
}

body {
  margin: 0;
  min-height: 100vh;
  display: grid;
  place-items: center;
  background: linear-gradient(135deg, #f7f2ea, #fde6c8);
}

.stage {
  text-align: center;
  padding: 48px;
  background: white;
  border-radius: 24px;
  box-shadow: 0 16px 40px rgba(0, 0, 0, 0.12);
}

button {
  margin-top: 20px;
  border: none;
  background: #d65a31;
  color: white;
  padding: 12px 18px;
  border-radius: 999px;
  font-weight: 600;
}
"#;

const STARTER_JS: &str = r#"const btn = document.getElementById("btn");

btn?.addEventListener("click", () => {
  btn.textContent = "Nice!";
});
"#;

/// The three files a new project starts with.
pub fn starter_files() -> Vec<File> {
    vec![
        File::text("index.html", STARTER_HTML),
        File::text("style.css", STARTER_CSS),
        File::text("script.js", STARTER_JS),
    ]
}
