use crate::minizinc::SolverConfig;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use zinc::{Model, SolutionRecord};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_variables(&self, model: &Model) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Variable").set_alignment(CellAlignment::Left),
            Cell::new("Domain").set_alignment(CellAlignment::Left),
        ]));

        for var in model.variables() {
            table.add_row(Row::from(vec![var.name().to_string(), var.domain().to_string()]));
        }

        format!(
            "{}\n{} variable(s), {} constraint(s)\n",
            table,
            model.variables().len(),
            model.constraints().len()
        )
    }

    pub fn format_solution(&self, index: usize, solution: &SolutionRecord, raw: bool) -> String {
        if raw {
            return format!(
                "{}\n",
                serde_json::Value::Object(solution.assignments.clone())
            );
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new(format!("Solution {}", index)).set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Left),
        ]));

        for (name, value) in &solution.assignments {
            table.add_row(Row::from(vec![name.clone(), value.to_string()]));
        }

        format!("{}\n", table)
    }

    pub fn format_solvers(&self, solvers: &[SolverConfig]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec!["Id", "Name", "Version", "Tags"]));

        for solver in solvers {
            table.add_row(Row::from(vec![
                solver.id.clone(),
                solver.name.clone(),
                solver.version.clone(),
                solver.tags.join(", "),
            ]));
        }

        format!("{}\n", table)
    }
}
