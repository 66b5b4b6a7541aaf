use explorer::prelude::*;
use explorer::rows::NodeRow;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

fn sample() -> ExplorerState {
    let tree = TreeState::new(vec![
        Shape::container(
            "scripts",
            [
                Shape::leaf("foo.js"),
                Shape::leaf("bar.js"),
                Shape::container("baz", [Shape::leaf("qux.js"), Shape::leaf("quux.js")]),
                Shape::leaf(".gitignore"),
            ],
        ),
        Shape::container("docs", [Shape::leaf("readme.md")]),
    ]);
    ExplorerState::new(tree, ExplorerConfig::new().platform(Platform::Linux))
}

fn node_row<'a>(rows: &'a [Row], path: &str) -> &'a NodeRow {
    rows.iter()
        .filter_map(Row::as_node)
        .find(|row| row.path == path)
        .expect("row is visible")
}

#[test]
fn test_initial_outline() {
    let explorer = sample();
    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      ▾ baz
        · quux.js
        · qux.js
      · .gitignore
      · bar.js
      · foo.js
    ");
}

#[test]
fn test_rows_carry_layout() {
    let explorer = sample();
    let rows = explorer.rows();

    assert_eq!(rows.len(), 9);
    let scripts = node_row(&rows, "scripts");
    assert_eq!(scripts.key, "d-scripts");
    assert_eq!(scripts.indent, 0);
    assert_eq!(scripts.open, Some(true));

    let qux = node_row(&rows, "scripts/baz/qux.js");
    assert_eq!(qux.key, "f-qux.js");
    assert_eq!(qux.depth, 2);
    assert_eq!(qux.indent, 16);
    assert_eq!(qux.open, None);
}

#[test]
fn test_collapsed_container_hides_children() {
    let mut explorer = sample();
    explorer.select("scripts/baz");

    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      ▸ baz [selected, outlined]
      · .gitignore
      · bar.js
      · foo.js
    ");
}

#[test]
fn test_draft_rows_are_placed_by_kind() {
    let mut explorer = sample();

    explorer.invoke(MenuAction::NewFolder, "scripts");
    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      + <new directory>
      ▾ baz
        · quux.js
        · qux.js
      · .gitignore
      · bar.js
      · foo.js
    ");

    explorer.cancel();
    explorer.invoke(MenuAction::NewFile, "scripts");
    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      ▾ baz
        · quux.js
        · qux.js
      + <new file>
      · .gitignore
      · bar.js
      · foo.js
    ");
}

#[test]
fn test_create_session() {
    let mut explorer = sample();

    explorer.invoke(MenuAction::NewFile, "scripts/baz");
    let snapshot = explorer.commit_create("main.js").expect("file created");

    assert!(snapshot.find_by_path("scripts/baz/main.js").is_some());
    assert_eq!(explorer.pending(), None);
    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      ▾ baz
        · main.js
        · quux.js
        · qux.js
      · .gitignore
      · bar.js
      · foo.js
    ");
}

#[test]
fn test_rename_session() {
    let mut explorer = sample();
    explorer.select("scripts/baz/qux.js");

    let menu = explorer.open_menu("scripts/baz").expect("menu opens");
    assert!(menu.offers(MenuAction::NewFile));
    assert!(!explorer.is_active());

    explorer.invoke(MenuAction::Rename, "scripts/baz");
    let rows = explorer.rows();
    let baz = node_row(&rows, "scripts/baz");
    assert!(baz.editing);
    assert!(baz.focused);
    assert!(!baz.outlined);

    explorer.commit_rename("lib").expect("renamed");
    assert_eq!(explorer.selection(), Some("scripts/lib/qux.js"));
    assert_snapshot!(explorer.outline(), @r"
    ▾ docs
      · readme.md
    ▾ scripts
      ▾ lib [outlined]
        · quux.js
        · qux.js [selected]
      · .gitignore
      · bar.js
      · foo.js
    ");
}

#[test]
fn test_delete_session() {
    let mut explorer = sample();
    explorer.select("scripts/foo.js");

    assert!(explorer.request_delete_selected());
    let snapshot = explorer.confirm_delete().expect("deleted");

    let labels: Vec<_> = snapshot
        .children(snapshot.find_by_path("scripts").unwrap())
        .filter_map(|id| snapshot.label(id))
        .collect();
    assert_eq!(labels, vec!["baz", ".gitignore", "bar.js"]);
    assert_eq!(explorer.selection(), None);
    assert_eq!(explorer.focused(), None);
}

#[test]
fn test_cancel_leaves_tree_untouched() {
    let mut explorer = sample();
    let before = explorer.snapshot().clone();

    explorer.invoke(MenuAction::Delete, "docs");
    explorer.cancel();
    explorer.invoke(MenuAction::NewFile, "docs");
    assert!(explorer.commit_create("").is_none());

    assert!(std::sync::Arc::ptr_eq(explorer.snapshot(), &before));
}

#[test]
fn test_run_session() {
    let mut explorer = sample();
    let menu = explorer.open_menu("scripts/foo.js").expect("menu opens");
    assert!(menu.offers(MenuAction::Run));

    explorer.invoke(MenuAction::Run, "scripts/foo.js");
    let request = explorer.confirm_run("250").expect("run requested");

    assert_eq!(request.to_string(), "Run foo.js with delay 250");
    assert_eq!(request.path, "scripts/foo.js");
    assert!(explorer.is_active());
}

#[test]
fn test_focus_outline_follows_menu() {
    let mut explorer = sample();
    explorer.select("docs/readme.md");
    explorer.set_active(false);
    assert!(!node_row(&explorer.rows(), "docs/readme.md").outlined);

    explorer.open_menu("docs/readme.md");
    assert!(node_row(&explorer.rows(), "docs/readme.md").outlined);
}

#[test]
fn test_closed_by_default_config() {
    let tree = TreeState::new(vec![Shape::container(
        "scripts",
        [Shape::container("baz", [Shape::leaf("qux.js")])],
    )]);
    let config = ExplorerConfig::new().open_by_default(false).indent_width(4);
    let mut explorer = ExplorerState::new(tree, config);

    assert_eq!(explorer.outline(), "▸ scripts");
    explorer.select("scripts");
    let rows = explorer.rows();
    assert_eq!(node_row(&rows, "scripts/baz").indent, 4);
    assert_snapshot!(explorer.outline(), @r"
    ▾ scripts [selected, outlined]
      ▸ baz
    ");
}
