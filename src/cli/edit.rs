//! Commands that rewrite the document (init, sort, fmt)

use anyhow::Result;

use super::output::Output;
use crate::domain::Stack;
use crate::storage::StackFile;

/// Create an empty stack document
pub fn init(output: &Output, store: &StackFile) -> Result<()> {
    if store.init()? {
        output.success(&format!("Initialized stack at {}", store.path().display()));
    } else {
        output.verbose_ctx("init", "Document already exists, leaving it untouched");
        output.success(&format!("Stack already exists at {}", store.path().display()));
    }
    Ok(())
}

/// Sort every section by dependency weight
pub fn sort(output: &Output, store: &StackFile, write: bool) -> Result<()> {
    let mut stack = load(output, store, "sort")?;
    stack.sort();
    emit(output, store, &stack, write, "Sorted")
}

/// Re-render the document as is
pub fn fmt(output: &Output, store: &StackFile, write: bool) -> Result<()> {
    let stack = load(output, store, "fmt")?;
    emit(output, store, &stack, write, "Formatted")
}

fn load(output: &Output, store: &StackFile, ctx: &str) -> Result<Stack> {
    let stack = store.read()?;
    output.verbose_ctx(
        ctx,
        &format!(
            "Parsed {} entries in {} sections",
            stack.len(),
            stack.section_count()
        ),
    );
    Ok(stack)
}

fn emit(output: &Output, store: &StackFile, stack: &Stack, write: bool, verb: &str) -> Result<()> {
    if write {
        store.write(stack)?;
        output.success(&format!(
            "{} {} entries in {}",
            verb,
            stack.len(),
            store.path().display()
        ));
    } else if output.is_json() {
        let sections: Vec<_> = stack
            .sections()
            .map(|(name, list)| {
                let entries: Vec<_> = list
                    .iter()
                    .filter_map(|idx| stack.get(*idx).map(|e| (*idx, e)))
                    .map(|(idx, entry)| {
                        serde_json::json!({
                            "id": entry.id,
                            "title": entry.title,
                            "weight": stack.weight(idx),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "section": name,
                    "entries": entries,
                })
            })
            .collect();
        output.data(&sections);
    } else {
        print!("{}", stack);
    }
    Ok(())
}
