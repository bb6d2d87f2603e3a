use std::fs;

use dhrender::model::{ShadingMode, Triangle, Vertex};
use dhrender::processor::lexer::{EntitySource, Lexer};
use dhrender::processor::{compile, compile_str, first_pass};
use dhrender::{ErrorKind, error_message};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/scenes/{name}")).unwrap()
}

#[test]
fn compiles_flat_triangle() {
    let scene = compile_str(&load("flat_triangle.dhr")).expect("valid script");

    assert_eq!(scene.config.width, 4);
    assert_eq!(scene.config.height, 4);
    assert_eq!(scene.config.shading, ShadingMode::Flat);
    assert!(scene.vertices().iter().all(|v| v.color == 0));
    assert_eq!(
        scene.triangles(),
        &[Triangle {
            i: 0,
            j: 1,
            k: 2,
            color: 0xff0000
        }]
    );
}

#[test]
fn compiles_gradient_quad_with_forward_references() {
    let scene = compile_str(&load("gradient_quad.dhr")).expect("valid script");

    assert_eq!(scene.config.shading, ShadingMode::Interpolated);
    assert_eq!(scene.vertices().len(), 4);
    assert_eq!(scene.triangle_count(), 2);
    assert_eq!(
        scene.vertices()[2],
        Vertex {
            x: 319,
            y: 239,
            z: 20,
            color: 0x0000ff
        }
    );
    assert_eq!(scene.corner_color(1, 2), 0xffffff);
}

#[test]
fn pass_counts_match_declarations() {
    let script = load("gradient_quad.dhr");
    let mut lex = Lexer::new(&script);

    let summary = first_pass(&mut lex).unwrap();
    let scene = compile(&mut lex).unwrap();

    assert_eq!(summary.counts.vertices, scene.vertices().len());
    assert_eq!(summary.counts.triangles, scene.triangles().len());
}

#[test]
fn non_script_input_has_no_signature() {
    for script in ["", "  \n", "} |;", "%dhrender", "1 ; |;"] {
        let err = compile_str(script).unwrap_err();
        assert_eq!(err, ErrorKind::NoSignature.at(0), "script {script:?}");
        assert_eq!(err.to_string(), "Failed to read script signature");
    }
}

#[test]
fn repeated_dim_reports_second_occurrence() {
    let err = compile_str(&load("repeated_dim.dhr")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::HeaderRepeated);
    assert_eq!(err.line, 3);
    assert_eq!(err.to_string(), "[Line 3] Repetition of header metacommand");
}

#[test]
fn vertex_limit_is_inclusive() {
    let header = "%dhrender; %dim 16 16; %shade triangle;\n";

    let exact = format!("{header}{}|;", "0 0 0 v\n".repeat(16384));
    let scene = compile_str(&exact).unwrap();
    assert_eq!(scene.vertices().len(), 16384);

    let over = format!("{header}{}|;", "0 0 0 v\n".repeat(16385));
    let err = compile_str(&over).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TooManyVertices);
    assert_eq!(err.line, 16386);
}

#[test]
fn triangle_index_bounds() {
    let header = "%dhrender; %dim 16 16; %shade vertex;\n";
    let verts = "0 0 0 {000000} v 1 0 0 {000000} v 0 1 0 {000000} v\n";

    let ok = format!("{header}{verts}0 1 2 t\n|;");
    assert!(compile_str(&ok).is_ok());

    let bad = format!("{header}{verts}0 1 3 t\n|;");
    assert_eq!(
        compile_str(&bad).unwrap_err().kind,
        ErrorKind::InvalidVertexIndex
    );
}

#[test]
fn negative_z_rejected_in_both_modes() {
    let flat = "%dhrender; %dim 4 4; %shade triangle;\n0 0 -3 v\n|;";
    let smooth = "%dhrender; %dim 4 4; %shade vertex;\n0 0 -3 {000000} v\n|;";
    for script in [flat, smooth] {
        let err = compile_str(script).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NegativeZCoordinate);
        assert_eq!(err.line, 2);
    }
}

#[test]
fn leftover_literal_is_stack_data_remaining() {
    let script = "%dhrender; %dim 4 4; %shade triangle;\n0 0 0 v 7\n|;";
    let err = compile_str(script).unwrap_err();
    assert_eq!(err.kind, ErrorKind::StackDataRemaining);
    assert_eq!(err.line, 0);
}

#[test]
fn trailing_data_after_eof_marker() {
    let script = "%dhrender; %dim 4 4; %shade triangle;\n|;\nextra";
    let err = compile_str(script).unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.kind.code(), -8);
    assert_eq!(error_message(err.kind.code()), "Content after end of file marker");
}

#[test]
fn rewind_restarts_source() {
    let script = load("flat_triangle.dhr");
    let mut lex = Lexer::new(&script);
    while lex.next_entity().unwrap() != dhrender::processor::lexer::Entity::Eof {}
    lex.rewind();
    assert!(compile(&mut lex).is_ok());
}
