//! Static JSON documents used across harnesses.

use kpidex_core::Dataset;
use std::io::Write;
use tempfile::NamedTempFile;

/// The Banking example: one KPI under Finance → Banking → Lending → Retail,
/// plus a use case whose name is a number.
pub const BANKING_JSON: &str = r#"[
  {
    "domain": "Finance",
    "industries": [
      {
        "industry": "Banking",
        "classifications": [
          {
            "classification": "Core",
            "departments": [
              {
                "department": "Lending",
                "subdepartments": [
                  {
                    "subdepartment": "Retail",
                    "kpicollection": [
                      {
                        "kpi": "Net Interest Margin",
                        "formula": "(Interest Income - Interest Expense) / Earning Assets",
                        "explanation": "Profitability of lending"
                      }
                    ],
                    "usecases": [
                      { "usecase": 123, "description": "broken entry" }
                    ]
                  }
                ]
              }
            ]
          }
        ]
      }
    ]
  }
]"#;

/// The same domain name twice, each holding one industry.
pub const DUPLICATE_DOMAINS_JSON: &str = r#"[
  { "domain": "Finance", "industries": [ { "industry": "Banking" } ] },
  { "domain": "Healthcare", "industries": [ { "industry": "Hospitals" } ] },
  { "domain": "Finance", "industries": [ { "industry": "Capital Markets" } ] }
]"#;

pub fn banking() -> Dataset {
    Dataset::from_json_str(BANKING_JSON).expect("banking fixture parses")
}

/// Write `contents` to a temporary `.json` file that lives as long as the
/// returned handle.
pub fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
