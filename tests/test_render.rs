//! Rendering through a real Graphviz install. Tests return early when `dot`
//! is not on PATH.

use hello_graphviz::{Digraph, Format, Graphviz, RenderOptions};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn graphviz() -> Option<Graphviz> {
    let graphviz = Graphviz::new();
    if graphviz.is_available() {
        Some(graphviz)
    } else {
        eprintln!("skipping: Graphviz `dot` not found");
        None
    }
}

fn hello_world() -> Digraph {
    let mut g = Digraph::new("G");
    g.edge("Hello", "World");
    g
}

#[test]
fn test_render_hello_world_png() {
    let Some(graphviz) = graphviz() else { return };
    let dir = tempfile::tempdir().unwrap();

    let options = RenderOptions::new("hello_world")
        .directory(dir.path())
        .format(Format::Png)
        .scale(2.0);
    let path = hello_world().render(&graphviz, &options).unwrap();

    assert_eq!(path, dir.path().join("hello_world.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
    assert!(dir.path().join("hello_world").exists());
}

#[test]
fn test_scale_enlarges_png() {
    let Some(graphviz) = graphviz() else { return };
    let g = hello_world();

    let small = g.pipe(&graphviz, Format::Png, 1.0).unwrap();
    let large = g.pipe(&graphviz, Format::Png, 2.0).unwrap();

    assert!(large.len() > small.len());
}

#[test]
fn test_svg_contains_labels() {
    let Some(graphviz) = graphviz() else { return };

    let svg = hello_world().pipe(&graphviz, Format::Svg, 1.0).unwrap();
    let svg = String::from_utf8(svg).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("Hello"));
    assert!(svg.contains("World"));
}

#[test]
fn test_cleanup_removes_source() {
    let Some(graphviz) = graphviz() else { return };
    let dir = tempfile::tempdir().unwrap();

    let options = RenderOptions::new("clean")
        .directory(dir.path())
        .format(Format::Svg)
        .cleanup(true);
    let path = hello_world().render(&graphviz, &options).unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("clean").exists());
}

#[test]
fn test_invalid_dot_reports_failure() {
    use hello_graphviz::{Engine, PipeRequest, RenderError, Renderer};

    let Some(graphviz) = graphviz() else { return };
    let request = PipeRequest {
        engine: Engine::Dot,
        format: Format::Svg,
        scale: 1.0,
    };

    let err = graphviz.pipe("digraph {", &request).unwrap_err();
    assert!(matches!(err, RenderError::Failed { .. }));
}

#[test]
fn test_version_banner() {
    let Some(graphviz) = graphviz() else { return };
    assert!(graphviz.version().unwrap().to_lowercase().contains("graphviz"));
}
