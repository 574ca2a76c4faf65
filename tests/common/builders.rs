//! Test builders: ergonomic constructors for [`Dataset`] trees.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use kpidex_core::{
    Classification, Dataset, Department, Domain, Industry, Kpi, Subdepartment, UseCase,
};

// ---------------------------------------------------------------------------
// DatasetBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Dataset`] fixtures. Each call attaches to the most
/// recently added parent.
///
/// # Example
///
/// ```rust
/// let ds = DatasetBuilder::new()
///     .domain("Finance")
///     .industry("Banking")
///     .subdepartment("Lending", "Retail")
///     .kpi("Net Interest Margin")
///     .usecase("Credit Scoring")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    domains: Vec<Domain>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, name: impl Into<String>) -> Self {
        self.domains.push(Domain {
            name: name.into(),
            industries: Vec::new(),
        });
        self
    }

    /// Add an industry with a single unnamed classification.
    pub fn industry(mut self, name: impl Into<String>) -> Self {
        self.last_domain().industries.push(Industry {
            name: name.into(),
            classifications: vec![Classification {
                name: None,
                departments: Vec::new(),
            }],
        });
        self
    }

    /// Add a subdepartment, creating `department` on first use.
    pub fn subdepartment(mut self, department: &str, name: impl Into<String>) -> Self {
        let classification = self
            .last_industry()
            .classifications
            .last_mut()
            .expect("industry has a classification");
        let index = match classification
            .departments
            .iter()
            .position(|d| d.name == department)
        {
            Some(i) => i,
            None => {
                classification.departments.push(Department {
                    name: department.to_string(),
                    subdepartments: Vec::new(),
                });
                classification.departments.len() - 1
            }
        };
        classification.departments[index].subdepartments.push(Subdepartment {
            name: name.into(),
            kpicollection: Vec::new(),
            usecases: Vec::new(),
        });
        self
    }

    pub fn kpi(self, name: impl Into<String>) -> Self {
        self.push_kpi(Kpi {
            name: name.into(),
            formula: None,
            explanation: None,
        })
    }

    pub fn kpi_with(self, name: &str, formula: &str, explanation: &str) -> Self {
        self.push_kpi(Kpi {
            name: name.to_string(),
            formula: Some(formula.to_string()),
            explanation: Some(explanation.to_string()),
        })
    }

    pub fn usecase(mut self, name: impl Into<String>) -> Self {
        self.last_subdepartment().usecases.push(UseCase {
            name: Some(name.into()),
            definitions: None,
            description: None,
            business_impact: None,
        });
        self
    }

    /// A use case whose name was not a string in the source document.
    pub fn unnamed_usecase(mut self) -> Self {
        self.last_subdepartment().usecases.push(UseCase {
            name: None,
            definitions: Some("name was not a string".to_string()),
            description: None,
            business_impact: None,
        });
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.domains)
    }

    fn push_kpi(mut self, kpi: Kpi) -> Self {
        self.last_subdepartment().kpicollection.push(kpi);
        self
    }

    fn last_domain(&mut self) -> &mut Domain {
        self.domains.last_mut().expect("call .domain() first")
    }

    fn last_industry(&mut self) -> &mut Industry {
        self.last_domain()
            .industries
            .last_mut()
            .expect("call .industry() first")
    }

    fn last_subdepartment(&mut self) -> &mut Subdepartment {
        self.last_industry()
            .classifications
            .iter_mut()
            .flat_map(|c| c.departments.iter_mut())
            .flat_map(|d| d.subdepartments.iter_mut())
            .last()
            .expect("call .subdepartment() first")
    }
}

// ---------------------------------------------------------------------------
// Synthetic datasets
// ---------------------------------------------------------------------------

/// A dataset of `domains` x `industries` x `subs` subdepartments, each with
/// `kpis` KPIs and one use case. Names are unique and predictable
/// (`Industry 3-1`, `KPI 3-1-0-2`, ...).
pub fn synthetic_dataset(domains: usize, industries: usize, subs: usize, kpis: usize) -> Dataset {
    let mut builder = DatasetBuilder::new();
    for d in 0..domains {
        builder = builder.domain(format!("Domain {d}"));
        for i in 0..industries {
            builder = builder.industry(format!("Industry {d}-{i}"));
            for s in 0..subs {
                builder = builder.subdepartment("Operations", format!("Sub {d}-{i}-{s}"));
                for k in 0..kpis {
                    builder = builder.kpi(format!("KPI {d}-{i}-{s}-{k}"));
                }
                builder = builder.usecase(format!("Use Case {d}-{i}-{s}"));
            }
        }
    }
    builder.build()
}
