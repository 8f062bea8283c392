use crate::loader::Source;

pub fn render_dashboard(chart_json: &str, failed: &[Source]) -> String {
    let notice = if failed.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = failed.iter().map(|source| source.label()).collect();
        format!("Could not load {}; showing the rest.", names.join(", "))
    };

    DASHBOARD_HTML
        .replace("{{NOTICE}}", &notice)
        // keeps the payload from closing the script element
        .replace("{{CHART}}", &chart_json.replace('<', "\\u003c"))
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tremor Dashboard</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #24303a;
      --accent: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .app {
      width: min(1000px, 100%);
      background: var(--card);
      border-radius: 20px;
      box-shadow: 0 18px 48px rgba(47, 72, 88, 0.16);
      padding: 28px;
      display: grid;
      gap: 18px;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    button, select {
      border: 0;
      border-radius: 999px;
      padding: 8px 16px;
      background: var(--accent);
      color: white;
      font: inherit;
      cursor: pointer;
    }

    .spacer { flex: 1; }
    .notice { color: #9a3b2f; min-height: 1.2em; }
  </style>
</head>
<body>
  <main class="app">
    <header class="toolbar">
      <h1>Tremor severity</h1>
      <span class="spacer"></span>
      <select id="subject"><option value="0">Me</option></select>
      <form method="post" action="/auth/signout"><button type="submit">Sign out</button></form>
    </header>
    <div class="toolbar">
      <button data-range="week">Week</button>
      <button data-range="month">Month</button>
      <button data-range="year">Year</button>
    </div>
    <p class="notice" id="notice">{{NOTICE}}</p>
    <canvas id="myChart"></canvas>
  </main>

  <script id="chart-spec" type="application/json">{{CHART}}</script>
  <script src="https://cdn.jsdelivr.net/npm/moment@2.29.4/moment.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@2.9.4/dist/Chart.min.js"></script>
  <script>
    const ctx = document.getElementById('myChart').getContext('2d');
    const noticeEl = document.getElementById('notice');
    const subjectEl = document.getElementById('subject');
    let chart = null;

    const draw = (spec) => {
      if (chart) {
        chart.destroy();
      }
      chart = new Chart(ctx, spec);
    };

    const guarded = async (res) => {
      if (res.status === 401) {
        window.location.replace('/signin.html');
        return null;
      }
      if (!res.ok) {
        noticeEl.textContent = await res.text();
        return null;
      }
      return res.json();
    };

    document.querySelectorAll('[data-range]').forEach((button) => {
      button.addEventListener('click', async () => {
        const res = await fetch('/api/range', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ range: button.dataset.range }),
        });
        const spec = await guarded(res);
        if (spec && chart) {
          chart.options.scales.xAxes[0].ticks.min = spec.options.scales.xAxes[0].ticks.min;
          chart.update();
        }
      });
    });

    subjectEl.addEventListener('change', async () => {
      noticeEl.textContent = '';
      const spec = await guarded(await fetch('/api/chart?uid=' + subjectEl.value));
      if (spec) {
        draw(spec);
      }
    });

    const loadSubjects = async () => {
      const subjects = await guarded(await fetch('/api/subjects'));
      (subjects || []).forEach((subject) => {
        const option = document.createElement('option');
        option.value = subject.uid;
        option.textContent = subject.name;
        subjectEl.appendChild(option);
      });
    };

    draw(JSON.parse(document.getElementById('chart-spec').textContent));
    loadSubjects();
  </script>
</body>
</html>
"#;

pub const SIGNIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Sign in</title>
</head>
<body>
  <form id="signin">
    <h1>Sign in</h1>
    <input id="email" name="email" type="email" placeholder="Email" required />
    <input id="password" name="password" type="password" placeholder="Password" required />
    <button type="submit">Sign in</button>
    <p><a href="/signup.html">Create an account</a></p>
  </form>
  <script>
    document.getElementById('signin').addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const res = await fetch('/auth/signin', {
          method: 'POST',
          body: new URLSearchParams(new FormData(event.target)),
          redirect: 'manual',
        });
        if (res.type === 'opaqueredirect') {
          window.location.replace('/index.html');
        } else if (!res.ok) {
          alert(await res.text());
        }
      } catch (error) {
        alert(error);
      }
    });
  </script>
</body>
</html>
"#;

pub const SIGNUP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Sign up</title>
</head>
<body>
  <form id="signup">
    <h1>Sign up</h1>
    <input id="full_name" name="name" placeholder="Full name" required />
    <input id="email" name="email" type="email" placeholder="Email" required />
    <input id="password" name="password" type="password" placeholder="Password" required />
    <input id="confirm_password" name="confirm_password" type="password" placeholder="Confirm password" required />
    <button type="submit">Sign up</button>
  </form>
  <script>
    const password = document.getElementById('password');
    const confirmPassword = document.getElementById('confirm_password');

    const validatePassword = () => {
      confirmPassword.setCustomValidity(
        password.value !== confirmPassword.value ? 'Passwords do not match' : ''
      );
    };

    password.onchange = validatePassword;
    confirmPassword.onkeyup = validatePassword;

    document.getElementById('signup').addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const res = await fetch('/auth/signup', {
          method: 'POST',
          body: new URLSearchParams(new FormData(event.target)),
          redirect: 'manual',
        });
        if (res.type === 'opaqueredirect') {
          window.location.replace('/signin.html');
        } else if (!res.ok) {
          alert(await res.text());
        }
      } catch (error) {
        alert(error);
      }
    });
  </script>
</body>
</html>
"#;
