use anyhow::{Context, Result};
use explorer::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let tree = TreeState::new(vec![Shape::container(
        "scripts",
        [
            Shape::leaf("foo.js"),
            Shape::container("baz", [Shape::leaf("qux.js"), Shape::leaf("quux.js")]),
            Shape::leaf(".gitignore"),
        ],
    )]);
    let mut explorer = ExplorerState::new(tree, ExplorerConfig::default());

    println!("Initial tree:");
    println!("{}\n", explorer.outline());

    // Right-click the root and add a file through the inline draft
    let menu = explorer
        .open_menu("scripts")
        .context("scripts should be visible")?;
    for entry in &menu.entries {
        println!("  menu: {}", entry);
    }
    explorer.invoke(MenuAction::NewFile, "scripts");
    println!("\nDrafting a new file:");
    println!("{}\n", explorer.outline());
    explorer.commit_create("bar.js");
    println!("After create:");
    println!("{}\n", explorer.outline());

    // Rename a folder with the keyboard shortcut
    explorer.focus("scripts/baz");
    explorer.begin_rename_focused();
    explorer.commit_rename("lib");
    println!("After rename:");
    println!("{}\n", explorer.outline());

    // Delete the selected file
    explorer.select("scripts/foo.js");
    explorer.request_delete_selected();
    explorer.confirm_delete();
    println!("After delete:");
    println!("{}\n", explorer.outline());

    // Ask to run a script
    explorer.invoke(MenuAction::Run, "scripts/bar.js");
    if let Some(request) = explorer.confirm_run("250") {
        println!("{}", request);
    }

    println!("\nPublished generation {}", explorer.tree().generation());
    Ok(())
}
