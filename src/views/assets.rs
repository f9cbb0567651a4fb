//! Static files referenced by the rendered pages.

/// Advisory keystroke filters. Inputs opt in with `data-filter`; the server
/// re-validates everything regardless of what this script allowed through.
pub const SCRIPT: &str = r#"(function () {
  "use strict";

  var filters = {
    name: function (value) {
      return value.replace(/[^A-Za-z ]/g, "");
    },
    studentno: function (value) {
      return value.replace(/[^0-9-]/g, "");
    },
    contact: function (value) {
      return value.replace(/[^0-9]/g, "").slice(0, 11);
    }
  };

  document.addEventListener("DOMContentLoaded", function () {
    document.querySelectorAll("input[data-filter]").forEach(function (input) {
      var filter = filters[input.dataset.filter];
      if (!filter) {
        return;
      }
      input.addEventListener("input", function () {
        var filtered = filter(input.value);
        if (filtered !== input.value) {
          input.value = filtered;
        }
      });
    });
  });
})();
"#;

pub const STYLESHEET: &str = r#"body {
  font-family: Arial, sans-serif;
  background: #f1f6f1;
  margin: 0;
  padding: 0;
}

.header {
  background: #0b3d0b;
  color: white;
  padding: 20px 0;
  text-align: center;
}

.header h1 {
  margin: 0;
  font-size: 26px;
}

.container {
  max-width: 900px;
  margin: 30px auto;
  background: white;
  padding: 30px 40px;
  border-radius: 10px;
  border-top: 8px solid #d4af37;
  box-shadow: 0 5px 15px rgba(0, 0, 0, 0.15);
}

label {
  font-weight: bold;
  display: block;
  margin-top: 15px;
  color: #0b3d0b;
}

input, select {
  width: 100%;
  padding: 12px;
  border-radius: 8px;
  border: 1px solid #aaa;
  margin-top: 5px;
  font-size: 14px;
  box-sizing: border-box;
}

input:focus, select:focus {
  border-color: #0b3d0b;
  outline: none;
}

button {
  width: 100%;
  background: #0b3d0b;
  color: white;
  padding: 14px;
  border: none;
  border-radius: 8px;
  font-size: 16px;
  margin-top: 25px;
  cursor: pointer;
  font-weight: bold;
}

button:hover {
  background: #145214;
}

.error {
  color: #b30000;
  font-size: 13px;
  min-height: 1em;
}

.table-container {
  margin-top: 20px;
  overflow-x: auto;
}

table {
  width: 100%;
  border-collapse: collapse;
}

thead {
  background: #0b3d0b;
  color: white;
}

th, td {
  padding: 12px;
  border: 1px solid #ccc;
}

tr:nth-child(even) {
  background: #f1f6f1;
}
"#;
