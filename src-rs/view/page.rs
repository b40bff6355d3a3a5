/// Page shell. Every region is filled from `/ui/state` snapshots; no markup is built client side.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Browser Automation Console</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <link href="https://cdn.jsdelivr.net/npm/font-awesome@4.7.0/css/font-awesome.min.css" rel="stylesheet" />
  <script>
    tailwind.config = { theme: { extend: { colors: { primary: "#165DFF", dark: "#1D2129" } } } };
  </script>
</head>
<body class="bg-gray-50 text-dark min-h-screen">
  <header class="flex items-center justify-between px-6 py-3 shadow-sm">
    <h1 class="text-lg font-semibold"><i class="fa fa-globe text-primary"></i> Browser Automation Console</h1>
    <div class="flex gap-3">
      <button id="theme-toggle" class="p-2"><i class="fa fa-moon-o"></i></button>
      <button id="help-button" class="p-2"><i class="fa fa-question-circle"></i></button>
    </div>
  </header>

  <main class="grid grid-cols-12 gap-4 p-6">
    <section class="col-span-4 space-y-4">
      <div class="bg-white rounded-lg shadow p-4">
        <textarea id="task-input" rows="4" class="w-full border rounded p-2 text-dark" placeholder="e.g. 在百度搜索人工智能"></textarea>
        <label class="block text-sm mt-2"><input type="checkbox" id="headless-mode" checked /> Headless</label>
        <label class="block text-sm"><input type="checkbox" id="slow-mode" /> Slow motion</label>
        <div class="flex gap-2 mt-3">
          <button id="execute-task" class="bg-primary text-white py-2 px-4 rounded-lg">Run task</button>
          <button id="reset-all" class="bg-gray-200 py-2 px-4 rounded-lg">Reset</button>
        </div>
      </div>
      <div class="bg-gray-100 rounded-lg p-3">
        <h2 class="text-sm font-semibold mb-2">History</h2>
        <div id="task-history" class="space-y-2"></div>
      </div>
    </section>

    <section class="col-span-8 space-y-4">
      <div class="bg-white rounded-lg shadow">
        <div class="flex items-center gap-2 border-b px-3 py-2">
          <button id="refresh-browser"><i class="fa fa-refresh"></i></button>
          <div id="browser-url" class="flex-1 text-sm text-gray-600 bg-gray-100 rounded px-2 py-1"></div>
          <button id="screenshot-btn"><i class="fa fa-camera"></i></button>
        </div>
        <div id="browser-content" class="min-h-[320px] flex items-center justify-center p-4"></div>
      </div>
      <div class="bg-dark rounded-lg p-3">
        <div class="flex justify-end gap-2 mb-2">
          <button id="clear-log" class="text-xs text-gray-300">Clear</button>
          <button id="download-log" class="text-xs text-gray-300">Download</button>
        </div>
        <div id="console-output" class="font-mono text-sm h-48 overflow-y-auto"></div>
      </div>
    </section>
  </main>

  <div id="help-modal" class="hidden fixed inset-0 bg-black/50 items-center justify-center">
    <div class="bg-white text-dark rounded-lg p-6 max-w-lg">
      <div class="flex justify-between mb-3">
        <h2 class="font-semibold">How it works</h2>
        <button id="close-help"><i class="fa fa-times"></i></button>
      </div>
      <p class="text-sm">Describe a browser task in plain language. The backend plans the steps and drives a
        browser; its log lines appear in the console and the page it reached is previewed on the right.</p>
      <button id="got-it" class="mt-4 bg-primary text-white py-1 px-3 rounded">Got it</button>
    </div>
  </div>

  <script>
    const $ = (id) => document.getElementById(id);
    let polling = null;
    let inputRevision = null;

    function apply(view) {
      // Task box and option boxes belong to the user after the first load; the
      // text is only overwritten when the server rewrote it (history pick, reset).
      if (inputRevision === null) {
        $("headless-mode").checked = view.headless;
        $("slow-mode").checked = view.slow_mo;
      }
      if (view.input_revision !== inputRevision) {
        $("task-input").value = view.input;
        inputRevision = view.input_revision;
      }
      $("browser-url").textContent = view.url;
      $("browser-content").innerHTML = view.viewport_html;
      $("task-history").innerHTML = view.history_html;
      const out = $("console-output");
      out.innerHTML = view.console_html;
      out.scrollTop = out.scrollHeight;
      $("theme-toggle").querySelector("i").className = `fa ${view.theme_icon}`;
      document.body.classList.remove(...view.replaced_classes);
      document.body.classList.add(...view.body_classes);
      $("help-modal").classList.toggle("hidden", !view.help_open);
      $("help-modal").classList.toggle("flex", view.help_open);
      if (view.pending > 0 && !polling) {
        polling = setInterval(load, 400);
      } else if (view.pending === 0 && polling) {
        clearInterval(polling);
        polling = null;
      }
    }

    async function call(method, url, body) {
      const res = await fetch(url, {
        method,
        headers: body ? { "Content-Type": "application/json" } : {},
        body: body ? JSON.stringify(body) : undefined,
      });
      const data = await res.json();
      if (data.ok === false) {
        console.warn(data.error);
        return load();
      }
      apply(data);
    }

    const load = () => call("GET", "/ui/state");
    const post = (url, body) => call("POST", url, body);

    $("execute-task").addEventListener("click", () => post("/ui/tasks", {
      task: $("task-input").value,
      headless: $("headless-mode").checked,
      slow_mo: $("slow-mode").checked,
    }));
    $("reset-all").addEventListener("click", () => post("/ui/reset"));
    $("clear-log").addEventListener("click", () => post("/ui/log/clear"));
    $("download-log").addEventListener("click", () => { window.location = "/ui/log/download"; });
    $("refresh-browser").addEventListener("click", () => post("/ui/browser/refresh"));
    $("screenshot-btn").addEventListener("click", () => post("/ui/browser/screenshot"));
    $("theme-toggle").addEventListener("click", () => post("/ui/theme"));
    $("help-button").addEventListener("click", () => post("/ui/help/open"));
    $("close-help").addEventListener("click", () => post("/ui/help/close"));
    $("got-it").addEventListener("click", () => post("/ui/help/close"));
    $("browser-content").addEventListener("click", (ev) => {
      if (ev.target.closest("[data-action='retry']")) post("/ui/tasks/retry");
    });
    $("task-history").addEventListener("click", (ev) => {
      const item = ev.target.closest("[data-history-index]");
      if (item) post(`/ui/history/${item.dataset.historyIndex}/select`);
    });

    load();
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_only_rewrites_task_box_on_new_input_revision() {
        assert!(INDEX_HTML.contains("view.input_revision !== inputRevision"));
        assert_eq!(INDEX_HTML.matches(r#"$("task-input").value = view.input"#).count(), 1);
        assert_eq!(INDEX_HTML.matches(r#"$("headless-mode").checked = view.headless"#).count(), 1);
        assert!(INDEX_HTML.contains("if (inputRevision === null) {"));
    }
}
