use crate::il::{OpCode, TypeUnit};
use anyhow::Result;
use std::path::Path;

/// Validate an input document and print a short summary
pub fn check(input: &Path) -> Result<()> {
    let unit = TypeUnit::from_file(input)
        .map_err(|e| anyhow::anyhow!("{}: {}", input.display(), e))?;

    if unit.procedures.is_empty() {
        anyhow::bail!("{}: no procedures to name", input.display());
    }
    unit.validate().map_err(|e| anyhow::anyhow!(e))?;

    let type_name = if unit.type_name.is_empty() {
        "<anonymous>"
    } else {
        unit.type_name.as_str()
    };
    println!("Type: {}", type_name);
    println!("Fields: {}", unit.fields.len());
    println!("Resolved methods: {}", unit.method_table().len());
    for procedure in &unit.procedures {
        let loops = procedure.body.nodes_with_code(OpCode::WhileLoop).count();
        let nodes = procedure.body.descendants().count();
        println!(
            "  {}: {} parameters, {} locals, {} nodes, {} loops",
            procedure.name,
            procedure.parameters().count(),
            procedure.locals().count(),
            nodes,
            loops
        );
    }
    println!("OK");
    Ok(())
}
