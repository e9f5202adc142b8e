//! Read-only query commands (list, show, cycles)

use anyhow::Result;

use super::output::Output;
use crate::domain::{find_cycles, EntryIdx, Stack};
use crate::storage::StackFile;

/// Resolves handles to ids, skipping dangling ones
fn ids(stack: &Stack, handles: &[EntryIdx]) -> Vec<String> {
    handles
        .iter()
        .filter_map(|idx| stack.get(*idx))
        .map(|e| e.id.clone())
        .collect()
}

fn section_label(name: &str) -> &str {
    if name.is_empty() {
        "(no section)"
    } else {
        name
    }
}

/// List entries with their weight, section by section
pub fn list(output: &Output, store: &StackFile, section_filter: Option<&str>) -> Result<()> {
    let stack = store.read()?;
    output.verbose_ctx("list", &format!("Loaded {} entries", stack.len()));

    if let Some(name) = section_filter {
        if stack.section(name).is_none() {
            anyhow::bail!("Section not found: {}", name);
        }
    }

    let sections: Vec<_> = stack
        .sections()
        .filter(|(name, _)| section_filter.map_or(true, |f| f == *name))
        .collect();

    if output.is_json() {
        let items: Vec<_> = sections
            .iter()
            .flat_map(|(name, list)| {
                let stack = &stack;
                list.iter().filter_map(move |idx| {
                    stack.get(*idx).map(|entry| {
                        serde_json::json!({
                            "id": entry.id,
                            "title": entry.title,
                            "section": name,
                            "weight": stack.weight(*idx),
                            "dependencies": ids(stack, entry.dependencies()),
                        })
                    })
                })
            })
            .collect();
        output.data(&items);
    } else if stack.is_empty() {
        println!("No entries.");
    } else {
        for (name, list) in sections {
            println!("{} ({}):", section_label(name), list.len());
            println!("  {:<12} {:>6}  TITLE", "ID", "WEIGHT");
            for idx in list {
                if let Some(entry) = stack.get(*idx) {
                    println!("  {:<12} {:>6}  {}", entry.id, stack.weight(*idx), entry.title);
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Show one entry in detail
pub fn show(output: &Output, store: &StackFile, id: &str) -> Result<()> {
    let stack = store.read()?;
    let idx = stack
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", id))?;
    let entry = stack
        .get(idx)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", id))?;

    let reachable = stack.weigher().reachable(idx);
    output.verbose_ctx("show", &format!("{} reaches {} entries", id, reachable.len()));

    let direct = ids(&stack, entry.dependencies());
    let transitive = ids(&stack, &reachable);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": entry.id,
            "title": entry.title,
            "section": entry.section,
            "description": entry.description,
            "weight": reachable.len(),
            "dependencies": direct,
            "reachable": transitive,
        }));
    } else {
        println!("{} [{}]", entry.title, entry.id);
        println!("Section: {}", section_label(&entry.section));
        println!("Weight:  {}", reachable.len());
        if !entry.description.is_empty() {
            println!();
            println!("{}", entry.description);
        }
        if !direct.is_empty() {
            println!();
            println!("Depends on: {}", direct.join(", "));
            println!("Reaches:    {}", transitive.join(", "));
        }
    }

    Ok(())
}

/// Report dependency cycles
///
/// Each cycle is printed as a closed chain of `depends on` links.
pub fn cycles(output: &Output, store: &StackFile) -> Result<()> {
    let stack = store.read()?;
    let cycles = find_cycles(&stack);
    output.verbose_ctx("cycles", &format!("Found {} cycles", cycles.len()));

    let cycles: Vec<_> = cycles.iter().map(|c| ids(&stack, c)).collect();

    if output.is_json() {
        output.data(&cycles);
    } else if cycles.is_empty() {
        println!("No dependency cycles.");
    } else {
        println!("Dependency cycles ({}):", cycles.len());
        for cycle in cycles {
            if let Some(first) = cycle.first() {
                println!("  {} -> {}", cycle.join(" -> "), first);
            }
        }
    }

    Ok(())
}
