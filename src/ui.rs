use crate::config::Config;
use crate::messages;
use crate::models::HistoryEntry;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{STYLE}}", SHARED_STYLE)
}

pub fn render_classify(config: &Config, history: &[HistoryEntry]) -> String {
    let texts = serde_json::json!({
        "idleLabel": messages::IDLE_LABEL,
        "idleDetail": messages::IDLE_DETAIL,
        "idleHint": messages::IDLE_HINT,
        "loadingLabel": messages::LOADING_LABEL,
        "loadingDetail": messages::LOADING_DETAIL,
        "errorLabel": messages::ERROR_LABEL,
        "errorHint": messages::ERROR_HINT,
        "rejectedLabel": messages::REJECTED_LABEL,
    });

    CLASSIFY_HTML
        .replace("{{STYLE}}", SHARED_STYLE)
        .replace("{{IDLE_LABEL}}", &escape_html(messages::IDLE_LABEL))
        .replace("{{IDLE_DETAIL}}", &escape_html(messages::IDLE_DETAIL))
        .replace("{{IDLE_HINT}}", &escape_html(messages::IDLE_HINT))
        .replace("{{BOX_RELATIVE_SIZE}}", &config.box_relative_size.to_string())
        .replace("{{JPEG_QUALITY}}", &(f64::from(config.jpeg_quality) / 100.0).to_string())
        .replace("{{TEXTS}}", &texts.to_string())
        // Labels come from upstream; nothing may be substituted after them.
        .replace("{{HISTORY}}", &render_history(history))
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return r#"<p class="empty">No predictions in this session yet.</p>"#.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="history-row"><span>[{}] Class: {}</span><span>{}%</span></div>"#,
                escape_html(&entry.time),
                escape_html(&entry.class),
                escape_html(&entry.confidence_pct)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const SHARED_STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0f1d1a;
      --bg-2: #163b33;
      --ink: #e8f1ee;
      --muted: #9fb5ae;
      --accent: #4da6ff;
      --accent-2: #3ccf91;
      --card: rgba(255, 255, 255, 0.06);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #10261f 60%, #0b1512 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    nav {
      position: sticky;
      top: 0;
      height: 64px;
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 0 28px;
      background: rgba(15, 29, 26, 0.9);
      backdrop-filter: blur(10px);
      z-index: 10;
    }

    nav .brand {
      font-family: "Fraunces", "Georgia", serif;
      font-size: 1.3rem;
      color: var(--accent-2);
      text-decoration: none;
    }

    main {
      width: min(1040px, 100%);
      margin: 0 auto;
      padding: 32px 18px 48px;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.8rem);
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 16px;
    }

    button, .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #06121f;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
    }

    button.secondary {
      background: transparent;
      color: var(--ink);
      border: 1px solid rgba(255, 255, 255, 0.2);
    }

    button:disabled {
      opacity: 0.45;
      cursor: not-allowed;
    }
"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EcoVision</title>
  <style>{{STYLE}}
    .hero {
      min-height: 60vh;
      display: grid;
      align-content: center;
      gap: 18px;
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    .classes {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
    }

    .classes div {
      padding: 14px;
      border-radius: 16px;
      border: 1px solid rgba(255, 255, 255, 0.08);
    }

    .classes strong {
      display: block;
      color: var(--accent-2);
      font-size: 1.3rem;
    }
  </style>
</head>
<body>
  <nav>
    <a class="brand" href="/">EcoVision</a>
    <div class="actions">
      <button class="secondary" type="button" data-scroll="#about">About</button>
      <button class="secondary" type="button" data-scroll="#classes">Plastics</button>
      <a class="button" href="/classify">Try the demo</a>
    </div>
  </nav>

  <main>
    <section class="hero">
      <h1>Identify plastics with your camera</h1>
      <p class="subtitle">Point your camera at a piece of plastic, capture it, and get an estimate of its resin type.</p>
      <div class="actions">
        <a class="button" href="/classify">Open the classifier</a>
        <button class="secondary" type="button" data-scroll="#about">How it works</button>
      </div>
    </section>

    <section id="about" class="card">
      <h2>How it works</h2>
      <p class="subtitle">The page crops the centered square of your camera frame, sends it as a JPEG to a remote image classifier, and shows the predicted class with its confidence. Every prediction in your session is listed in the history panel.</p>
    </section>

    <section id="classes" class="card">
      <h2>Recognised plastics</h2>
      <div class="classes">
        <div><strong>PET</strong>Polyethylene terephthalate</div>
        <div><strong>PE</strong>Polyethylene</div>
        <div><strong>PP</strong>Polypropylene</div>
        <div><strong>PS</strong>Polystyrene</div>
        <div><strong>PC</strong>Polycarbonate</div>
      </div>
    </section>
  </main>

  <script>
    const HEADER_OFFSET = 80;

    document.querySelectorAll('[data-scroll]').forEach((button) => {
      button.addEventListener('click', () => {
        const target = document.querySelector(button.dataset.scroll);
        if (target) {
          window.scrollTo({ top: target.offsetTop - HEADER_OFFSET, behavior: 'smooth' });
        }
      });
    });
  </script>
</body>
</html>
"##;

const CLASSIFY_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EcoVision | Classifier</title>
  <style>{{STYLE}}
    .layout {
      display: grid;
      grid-template-columns: minmax(0, 3fr) minmax(0, 2fr);
      gap: 24px;
    }

    .camera {
      position: relative;
      border-radius: 18px;
      overflow: hidden;
      background: #000;
      aspect-ratio: 4 / 3;
    }

    .camera video,
    .camera canvas {
      position: absolute;
      inset: 0;
      width: 100%;
      height: 100%;
      object-fit: cover;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.92rem;
      min-height: 1.2em;
    }

    #resultLabel {
      font-size: 1.5rem;
      font-weight: 600;
      margin: 0;
    }

    #resultConfidence {
      margin: 0;
      color: var(--accent-2);
    }

    #historyList {
      max-height: 260px;
      overflow-y: auto;
      font-size: 0.9rem;
    }

    .history-row {
      padding: 4px 0;
      border-bottom: 1px solid rgba(255, 255, 255, 0.04);
      display: flex;
      justify-content: space-between;
      gap: 10px;
    }

    .empty {
      color: var(--muted);
      margin: 0;
    }

    @media (max-width: 820px) {
      .layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <nav>
    <a class="brand" href="/">EcoVision</a>
    <span class="subtitle">Press C to capture, Q to clear the result</span>
  </nav>

  <main class="layout">
    <section class="card">
      <div class="camera">
        <video id="cameraVideo" autoplay playsinline muted></video>
        <canvas id="cameraOverlay"></canvas>
      </div>
      <div class="controls">
        <button id="btnStartCamera" type="button">Start camera</button>
        <button id="btnCapture" type="button" disabled>Capture</button>
      </div>
      <p id="cameraHint" class="hint">Start the camera and center the object in the frame.</p>
      <div class="controls">
        <input id="fileInput" type="file" accept="image/*" />
        <button id="btnUploadPredict" class="secondary" type="button" disabled>Upload &amp; predict</button>
      </div>
    </section>

    <section class="card">
      <h2>Result</h2>
      <p id="resultLabel">{{IDLE_LABEL}}</p>
      <p id="resultConfidence">{{IDLE_DETAIL}}</p>
      <p id="resultHint" class="hint">{{IDLE_HINT}}</p>
      <h2>History</h2>
      <div id="historyList">
{{HISTORY}}
      </div>
    </section>
  </main>

  <script>
    const BOX_RELATIVE_SIZE = {{BOX_RELATIVE_SIZE}};
    const JPEG_QUALITY = {{JPEG_QUALITY}};
    const TEXT = {{TEXTS}};

    const video = document.getElementById('cameraVideo');
    const overlay = document.getElementById('cameraOverlay');
    const overlayCtx = overlay.getContext('2d');
    const cameraHint = document.getElementById('cameraHint');
    const btnStart = document.getElementById('btnStartCamera');
    const btnCapture = document.getElementById('btnCapture');
    const resultLabel = document.getElementById('resultLabel');
    const resultConfidence = document.getElementById('resultConfidence');
    const resultHint = document.getElementById('resultHint');
    const historyList = document.getElementById('historyList');
    const fileInput = document.getElementById('fileInput');
    const btnUpload = document.getElementById('btnUploadPredict');

    let streaming = false;
    let box = null;

    const setResult = (label, detail, hint) => {
      resultLabel.textContent = label;
      resultConfidence.textContent = detail;
      resultHint.textContent = hint;
    };

    const computeBox = () => {
      const size = Math.min(overlay.width, overlay.height) * BOX_RELATIVE_SIZE;
      box = {
        x: (overlay.width - size) / 2,
        y: (overlay.height - size) / 2,
        size
      };
    };

    const fitOverlay = () => {
      const rect = video.getBoundingClientRect();
      overlay.width = rect.width;
      overlay.height = rect.height;
      computeBox();
    };

    const drawOverlay = () => {
      if (!streaming) {
        return;
      }
      overlayCtx.clearRect(0, 0, overlay.width, overlay.height);
      if (box) {
        overlayCtx.strokeStyle = 'rgba(77, 166, 255, 0.9)';
        overlayCtx.lineWidth = 3;
        overlayCtx.strokeRect(box.x, box.y, box.size, box.size);
      }
      requestAnimationFrame(drawOverlay);
    };

    btnStart.addEventListener('click', async () => {
      if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {
        cameraHint.textContent = 'Your browser does not support camera access (getUserMedia). Try Chrome or Edge.';
        return;
      }

      const isLocalhost = location.hostname === 'localhost' || location.hostname === '127.0.0.1';
      if (!window.isSecureContext && !isLocalhost) {
        cameraHint.textContent = 'The camera needs a secure page. Open this site over https or from http://localhost.';
        return;
      }

      try {
        video.srcObject = await navigator.mediaDevices.getUserMedia({
          video: { facingMode: 'user' },
          audio: false
        });
        btnStart.textContent = 'Camera active';
        btnStart.disabled = true;
        btnCapture.disabled = false;
        cameraHint.textContent = 'Center the object in the frame and press C or Capture.';
      } catch (err) {
        console.error('camera access failed', err);
        cameraHint.textContent = 'Could not access the camera. Check the browser permissions.';
      }
    });

    video.addEventListener('loadedmetadata', () => {
      fitOverlay();
      streaming = true;
      requestAnimationFrame(drawOverlay);
    });

    window.addEventListener('resize', () => {
      if (streaming) {
        fitOverlay();
      }
    });

    const appendHistory = (entry) => {
      if (historyList.firstElementChild && historyList.firstElementChild.tagName === 'P') {
        historyList.innerHTML = '';
      }
      const row = document.createElement('div');
      row.className = 'history-row';
      const left = document.createElement('span');
      left.textContent = `[${entry.time}] Class: ${entry.class}`;
      const right = document.createElement('span');
      right.textContent = `${entry.confidence_pct}%`;
      row.append(left, right);
      historyList.appendChild(row);
      historyList.scrollTop = historyList.scrollHeight;
    };

    const send = async (imageBase64, source) => {
      setResult(TEXT.loadingLabel, TEXT.loadingDetail, '');
      try {
        const res = await fetch('/api/predict', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ image_base64: imageBase64, source })
        });
        if (!res.ok) {
          const msg = await res.text();
          const err = new Error(msg || `Request failed with status ${res.status}`);
          err.status = res.status;
          throw err;
        }
        const data = await res.json();
        setResult(data.label, data.confidence_text, data.hint);
        appendHistory(data.entry);
      } catch (err) {
        console.error('prediction failed', err);
        if (err.status && err.status < 500) {
          setResult(TEXT.rejectedLabel, err.message, TEXT.idleHint);
        } else {
          setResult(TEXT.errorLabel, err.message, TEXT.errorHint);
        }
      }
    };

    const captureAndPredict = async () => {
      if (!streaming) {
        cameraHint.textContent = 'Start the camera first.';
        return;
      }
      if (!box) {
        cameraHint.textContent = 'Could not compute the capture frame.';
        return;
      }
      const width = video.videoWidth;
      const height = video.videoHeight;
      if (!width || !height) {
        cameraHint.textContent = 'Waiting for the video to be ready...';
        return;
      }

      const side = Math.floor(Math.min(width, height) * BOX_RELATIVE_SIZE);
      const sx = Math.floor((width - side) / 2);
      const sy = Math.floor((height - side) / 2);
      const canvas = document.createElement('canvas');
      canvas.width = side;
      canvas.height = side;
      canvas.getContext('2d').drawImage(video, sx, sy, side, side, 0, 0, side, side);

      await send(canvas.toDataURL('image/jpeg', JPEG_QUALITY), 'camera');
    };

    const readAsDataUrl = (file) => new Promise((resolve, reject) => {
      const reader = new FileReader();
      reader.onload = () => resolve(reader.result);
      reader.onerror = () => reject(reader.error || new Error('Could not read the file.'));
      reader.readAsDataURL(file);
    });

    const uploadAndPredict = async () => {
      if (!fileInput.files || fileInput.files.length === 0) {
        resultHint.textContent = 'Select a JPG or PNG image first.';
        return;
      }
      const file = fileInput.files[0];
      if (!file.type.startsWith('image/')) {
        resultHint.textContent = 'The file must be an image (JPG, PNG, etc.).';
        return;
      }

      let dataUrl;
      try {
        dataUrl = await readAsDataUrl(file);
      } catch (err) {
        console.error('file read failed', err);
        setResult('Could not read the selected image.', '', 'Try another JPG or PNG file.');
        return;
      }
      await send(dataUrl, 'upload');
    };

    btnCapture.addEventListener('click', () => {
      captureAndPredict();
    });

    fileInput.addEventListener('change', () => {
      btnUpload.disabled = !(fileInput.files && fileInput.files.length > 0);
    });

    btnUpload.addEventListener('click', (event) => {
      event.preventDefault();
      uploadAndPredict();
    });

    document.addEventListener('keydown', (event) => {
      if (event.target instanceof HTMLInputElement) {
        return;
      }
      const key = event.key.toLowerCase();
      if (key === 'c') {
        captureAndPredict();
      } else if (key === 'q') {
        setResult(TEXT.idleLabel, TEXT.idleDetail, TEXT.idleHint);
      }
    });
  </script>
</body>
</html>
"##;
