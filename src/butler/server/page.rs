// SPDX-License-Identifier: MIT

pub(super) const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>HikeButler - Personal Hiking Assistant</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; }
  .tabs button { padding: .5rem 1rem; border: 1px solid #ccc; background: #f5f5f5; cursor: pointer; }
  .tabs button.active { background: #2f6f3e; color: #fff; }
  .panel { display: none; gap: 2rem; margin-top: 1rem; }
  .panel.active { display: flex; }
  .panel > div { flex: 1; }
  label { display: block; margin-top: .75rem; font-weight: 600; }
  input, select, textarea { width: 100%; padding: .4rem; box-sizing: border-box; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #ddd; padding: .3rem .5rem; text-align: left; }
  pre { white-space: pre-wrap; background: #fafafa; padding: .75rem; }
  .primary { margin-top: 1rem; padding: .5rem 1rem; }
</style>
</head>
<body>
<h1>HikeButler - Personal Hiking Assistant</h1>

<div class="tabs">
  <button class="active" data-tab="prepare">Trip Preparation</button>
  <button data-tab="review">Trip Review</button>
</div>

<section id="prepare" class="panel active">
  <div>
    <p>Describe your hike and get a personalized plan.</p>
    <label for="location">Location</label>
    <input id="location" placeholder="e.g. Fragrant Hills, Beijing">
    <label for="duration">Duration</label>
    <select id="duration">
      <option>Half day</option>
      <option selected>One day</option>
      <option>Two days</option>
      <option>Three days or more</option>
    </select>
    <label for="difficulty">Difficulty</label>
    <select id="difficulty">
      <option>Easy</option>
      <option selected>Moderate</option>
      <option>Hard</option>
      <option>Extreme</option>
    </select>
    <label for="prepare-user">User ID (optional)</label>
    <input id="prepare-user" value="default_user">
    <button class="primary" id="prepare-btn">Generate plan</button>
  </div>
  <div>
    <h3>Gear list</h3>
    <table id="gear"><thead></thead><tbody></tbody></table>
    <h3>Hiking plan</h3>
    <pre id="plan"></pre>
  </div>
</section>

<section id="review" class="panel">
  <div>
    <p>Upload your track and photos to draft a trip post.</p>
    <label for="gpx">GPX track</label>
    <input id="gpx" type="file" accept=".gpx">
    <label for="photos">Photos</label>
    <input id="photos" type="file" accept="image/*" multiple>
    <label for="thoughts">Thoughts</label>
    <textarea id="thoughts" rows="5" placeholder="How did the hike go?"></textarea>
    <label for="review-user">User ID (optional)</label>
    <input id="review-user" value="default_user">
    <button class="primary" id="review-btn">Generate post</button>
  </div>
  <div>
    <h3>Post</h3>
    <pre id="post"></pre>
    <label for="xhs-status">Publish status</label>
    <input id="xhs-status" readonly>
  </div>
</section>

<script>
document.querySelectorAll(".tabs button").forEach((btn) => {
  btn.addEventListener("click", () => {
    document.querySelectorAll(".tabs button, .panel").forEach((el) => el.classList.remove("active"));
    btn.classList.add("active");
    document.getElementById(btn.dataset.tab).classList.add("active");
  });
});

async function postJson(url, body) {
  const res = await fetch(url, {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify(body),
  });
  return res.json();
}

function renderGear(columns, rows) {
  const table = document.getElementById("gear");
  const head = document.createElement("tr");
  for (const c of columns) {
    const th = document.createElement("th");
    th.textContent = c;
    head.appendChild(th);
  }
  table.tHead.replaceChildren(head);
  table.tBodies[0].replaceChildren(
    ...rows.map((r) => {
      const tr = document.createElement("tr");
      for (const cell of r) {
        const td = document.createElement("td");
        td.textContent = cell;
        tr.appendChild(td);
      }
      return tr;
    })
  );
}

document.getElementById("prepare-btn").addEventListener("click", async () => {
  document.getElementById("plan").textContent = "Generating hiking plan...";
  const out = await postJson("/api/prepare", {
    location: document.getElementById("location").value,
    duration: document.getElementById("duration").value,
    difficulty: document.getElementById("difficulty").value,
    user_id: document.getElementById("prepare-user").value || "default_user",
  });
  renderGear(out.columns, out.gear_list);
  document.getElementById("plan").textContent = out.plan;
});

document.getElementById("review-btn").addEventListener("click", async () => {
  document.getElementById("post").textContent = "Generating post...";
  const gpxFile = document.getElementById("gpx").files[0];
  const photos = Array.from(document.getElementById("photos").files).map((f) => f.name);
  const out = await postJson("/api/review", {
    gpx: gpxFile ? await gpxFile.text() : null,
    photos: photos.length ? photos : null,
    thoughts: document.getElementById("thoughts").value,
    user_id: document.getElementById("review-user").value || "default_user",
  });
  document.getElementById("post").textContent = out.post;
  document.getElementById("xhs-status").value = out.xhs_status;
});
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_cells_are_inserted_as_text() {
        assert!(INDEX_HTML.contains("td.textContent = cell"));
        assert!(INDEX_HTML.contains("th.textContent = c"));
        assert!(!INDEX_HTML.contains("innerHTML"));
    }
}
