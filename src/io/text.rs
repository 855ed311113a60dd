//! Text (ASCII) STL.
//!
//! ```text
//! solid <name>
//!   facet normal <nx> <ny> <nz>
//!     outer loop
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```
//!
//! Keywords are case-insensitive and may be separated by any whitespace.

use std::io::{BufWriter, Read, Write};

use crate::error::{EncodeError, Result, SyntaxError};
use crate::math::Vector3d;
use crate::topology::{Facet, Solid};

use super::lexer::{Lexer, Token};
use super::WriteParams;

/// Reads a text STL stream.
///
/// Facets keep the normal written in the file, even when it disagrees with
/// the vertex winding. Anything after the `endsolid` line is ignored.
///
/// # Errors
///
/// Returns `StlError::Syntax` if the input is not valid UTF-8 or breaks the
/// grammar, and `StlError::Io` if reading fails.
pub fn decode_text<R: Read>(mut reader: R) -> Result<Solid> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let src = match std::str::from_utf8(&data) {
        Ok(src) => src,
        Err(e) => {
            let valid = &data[..e.valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            return Err(SyntaxError::InvalidUtf8 { line }.into());
        }
    };

    let solid = Parser::new(src).solid()?;
    tracing::debug!(name = ?solid.name, facets = solid.facets.len(), "decoded text STL");
    Ok(solid)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
        }
    }

    fn solid(&mut self) -> std::result::Result<Solid, SyntaxError> {
        self.keyword("solid", "`solid`")?;
        let name = non_empty(self.lexer.rest_of_line());

        let mut facets = Vec::new();
        loop {
            let token = self.token("`facet` or `endsolid`")?;
            if is_keyword(&token, "facet") {
                facets.push(self.facet()?);
            } else if is_keyword(&token, "endsolid") {
                let end_name = non_empty(self.lexer.rest_of_line());
                if end_name.is_some() && end_name != name {
                    tracing::debug!(?name, ?end_name, "endsolid name does not match solid name");
                }
                break;
            } else {
                return Err(unexpected(&token, "`facet` or `endsolid`"));
            }
        }

        Ok(Solid::new(name.map(str::to_owned), facets))
    }

    /// Parses a facet after its `facet` keyword.
    fn facet(&mut self) -> std::result::Result<Facet, SyntaxError> {
        self.keyword("normal", "`normal`")?;
        let normal = self.vector()?;
        self.keyword("outer", "`outer`")?;
        self.keyword("loop", "`loop`")?;

        let mut vertices = Vec::with_capacity(3);
        let end = loop {
            let token = self.token("`vertex` or `endloop`")?;
            if is_keyword(&token, "vertex") {
                vertices.push(self.vector()?);
            } else if is_keyword(&token, "endloop") {
                break token;
            } else {
                return Err(unexpected(&token, "`vertex` or `endloop`"));
            }
        };
        if vertices.len() != 3 {
            return Err(SyntaxError::VertexCount {
                line: end.line,
                column: end.column,
                found: vertices.len(),
            });
        }

        self.keyword("endfacet", "`endfacet`")?;
        Ok(Facet::from_parts(Some(normal), vertices))
    }

    fn vector(&mut self) -> std::result::Result<Vector3d, SyntaxError> {
        Ok(Vector3d::new(self.number()?, self.number()?, self.number()?))
    }

    fn number(&mut self) -> std::result::Result<f64, SyntaxError> {
        let token = self.token("a number")?;
        match token.text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(SyntaxError::InvalidNumber {
                line: token.line,
                column: token.column,
                token: token.text.to_owned(),
            }),
        }
    }

    fn keyword(&mut self, keyword: &str, expected: &'static str) -> std::result::Result<(), SyntaxError> {
        let token = self.token(expected)?;
        if is_keyword(&token, keyword) {
            Ok(())
        } else {
            Err(unexpected(&token, expected))
        }
    }

    fn token(&mut self, expected: &'static str) -> std::result::Result<Token<'a>, SyntaxError> {
        self.lexer.next_token().ok_or_else(|| SyntaxError::UnexpectedEof {
            line: self.lexer.line(),
            expected,
        })
    }
}

fn is_keyword(token: &Token<'_>, keyword: &str) -> bool {
    token.text.eq_ignore_ascii_case(keyword)
}

fn unexpected(token: &Token<'_>, expected: &'static str) -> SyntaxError {
    SyntaxError::UnexpectedToken {
        line: token.line,
        column: token.column,
        expected,
        found: token.text.to_owned(),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Writes a solid as text STL, rejecting polygon facets.
///
/// # Errors
///
/// Returns `StlError::Encode` if a facet is not a triangle, and
/// `StlError::Io` if writing fails.
pub fn encode_text<W: Write>(solid: &Solid, writer: W) -> Result<()> {
    encode_text_with(solid, writer, &WriteParams::default())
}

/// Writes a solid as text STL with explicit parameters.
///
/// Without `params.precision` every coordinate reads back to the same `f64`.
///
/// # Errors
///
/// Returns `StlError::Encode` if a facet is not a triangle under
/// `PolygonPolicy::Reject` or the name contains a line break,
/// `StlError::Geometry` if triangulation fails, and
/// `StlError::Io` if writing fails. Nothing is written when an encode or
/// geometry error is returned.
pub fn encode_text_with<W: Write>(solid: &Solid, writer: W, params: &WriteParams) -> Result<()> {
    let name = solid.name.as_deref().unwrap_or_default();
    if name.contains('\n') {
        return Err(EncodeError::MultilineName {
            name: name.to_owned(),
        }
        .into());
    }
    let facets = params.triangles(solid)?;
    let mut w = BufWriter::new(writer);

    writeln!(w, "solid {name}")?;
    for facet in facets.iter() {
        let normal = facet.normal.unwrap_or_default();
        writeln!(w, "  facet normal {}", format_vector(&normal, params.precision))?;
        writeln!(w, "    outer loop")?;
        for vertex in &facet.vertices {
            writeln!(w, "      vertex {}", format_vector(vertex, params.precision))?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }
    writeln!(w, "endsolid {name}")?;
    w.flush()?;

    tracing::debug!(triangles = facets.len(), "encoded text STL");
    Ok(())
}

fn format_vector(v: &Vector3d, precision: Option<usize>) -> String {
    let [x, y, z] = v.to_array();
    match precision {
        Some(p) => format!("{x:.p$e} {y:.p$e} {z:.p$e}"),
        None => format!("{x:e} {y:e} {z:e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::io::PolygonPolicy;
    use crate::StlError;

    const CUBE_CORNER: &str = "\
solid corner
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal -1 0 0
    outer loop
      vertex 0 0 0
      vertex 0 1 0
      vertex 0 0 1
    endloop
  endfacet
endsolid corner
";

    fn v(x: f64, y: f64, z: f64) -> Vector3d {
        Vector3d::new(x, y, z)
    }

    fn syntax_error(src: &str) -> SyntaxError {
        match decode_text(src.as_bytes()).unwrap_err() {
            StlError::Syntax(e) => e,
            other => panic!("expected a syntax error, got {other}"),
        }
    }

    #[test]
    fn parses_facets_and_name() {
        let solid = decode_text(CUBE_CORNER.as_bytes()).unwrap();
        assert_eq!(solid.name.as_deref(), Some("corner"));
        assert_eq!(solid.facets.len(), 2);
        assert_eq!(solid.facets[1].normal, Some(v(-1.0, 0.0, 0.0)));
        assert_eq!(
            solid.facets[1].vertices,
            vec![v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0)]
        );
        assert!(solid.facets[0].attributes.is_none());
    }

    #[test]
    fn keywords_ignore_case_and_layout() {
        let src = "SOLID\nFacet NORMAL 0 0 1 Outer Loop vertex 0 0 0 VERTEX 1e0 0 0\n\
                   vertex -0 1.0E+0 0 EndLoop EndFacet EndSolid trailing words\nnot parsed";
        let solid = decode_text(src.as_bytes()).unwrap();
        assert!(solid.name.is_none());
        assert_eq!(solid.facets.len(), 1);
        assert_eq!(solid.facets[0].vertices[2], v(0.0, 1.0, 0.0));
    }

    #[test]
    fn name_keeps_inner_spaces() {
        let solid = decode_text("solid  my part \nendsolid other\n".as_bytes()).unwrap();
        assert_eq!(solid.name.as_deref(), Some("my part"));
        assert!(solid.facets.is_empty());
    }

    #[test]
    fn missing_endsolid() {
        let src = CUBE_CORNER.replace("endsolid corner\n", "");
        let err = syntax_error(&src);
        assert!(matches!(
            err,
            SyntaxError::UnexpectedEof {
                line: 16,
                expected: "`facet` or `endsolid`"
            }
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            syntax_error(""),
            SyntaxError::UnexpectedEof {
                line: 1,
                expected: "`solid`"
            }
        ));
    }

    #[test]
    fn wrong_vertex_count_reports_endloop() {
        let src = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\n  endloop\nendfacet\nendsolid t\n";
        assert!(matches!(
            syntax_error(src),
            SyntaxError::VertexCount {
                line: 6,
                column: 3,
                found: 2
            }
        ));

        let four = CUBE_CORNER.replacen("      vertex 0 1 0\n", "      vertex 0 1 0\n      vertex 1 1 0\n", 1);
        assert!(matches!(
            syntax_error(&four),
            SyntaxError::VertexCount { found: 4, .. }
        ));
    }

    #[test]
    fn misspelled_keyword_has_position() {
        let src = "solid t\nfacet normal 0 0 1\nouter lop\n";
        let err = syntax_error(src);
        assert!(matches!(
            &err,
            SyntaxError::UnexpectedToken {
                line: 3,
                column: 7,
                expected: "`loop`",
                found,
            } if found == "lop"
        ));
        assert_eq!(err.to_string(), "line 3, column 7: expected `loop`, found `lop`");
    }

    #[test]
    fn bad_numbers_rejected() {
        let src = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 1 x 0\n";
        assert!(matches!(
            syntax_error(src),
            SyntaxError::InvalidNumber { line: 4, column: 10, ref token } if token == "x"
        ));

        for bad in ["inf", "NaN", "1.0.0", "0x10"] {
            let src = format!("solid t\nfacet normal 0 0 {bad}\n");
            assert!(
                matches!(syntax_error(&src), SyntaxError::InvalidNumber { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn truncated_vertex_is_eof() {
        let src = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 1 2";
        assert!(matches!(
            syntax_error(src),
            SyntaxError::UnexpectedEof {
                line: 4,
                expected: "a number"
            }
        ));
    }

    #[test]
    fn whole_file_on_one_line() {
        let facet = "facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 vertex 0 1 0 endloop endfacet ";
        let src = format!("solid flat\n{}endsolid flat", facet.repeat(20_000));
        let solid = decode_text(src.as_bytes()).unwrap();
        assert_eq!(solid.facets.len(), 20_000);

        let bad = facet.replace("vertex 1 0 0", "vertex 1 q 0");
        let broken = format!("solid flat\n{}{bad}endsolid flat", facet.repeat(2));
        let column = 2 * facet.len() + bad.find('q').unwrap() + 1;
        assert!(matches!(
            syntax_error(&broken),
            SyntaxError::InvalidNumber { line: 2, column: c, .. } if c == column
        ));
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let mut data = b"solid t\nfacet normal 0 0 1\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        let err = decode_text(data.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            StlError::Syntax(SyntaxError::InvalidUtf8 { line: 3 })
        ));
    }

    #[test]
    fn writes_the_grammar() {
        let mut solid = Solid::new(Some("tri".into()), Vec::new());
        solid.add_facet(
            Some(v(0.0, 0.0, -1.0)),
            [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, -2.0, 0.0]],
        );
        let mut out = Vec::new();
        encode_text(&solid, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "solid tri\n  facet normal 0e0 0e0 -1e0\n    outer loop\n      vertex 0e0 0e0 0e0\n      \
             vertex 1.5e0 0e0 0e0\n      vertex 0e0 -2e0 0e0\n    endloop\n  endfacet\nendsolid tri\n"
        );
    }

    #[test]
    fn roundtrip_is_exact() {
        let mut solid = Solid::new(Some("odd values".into()), Vec::new());
        solid.add_facet(
            None,
            [[0.1, 1.0 / 3.0, -1e-300], [123_456.789, 2.0_f64.sqrt(), 5e20], [-0.7, 0.0, 1.0]],
        );
        let mut out = Vec::new();
        encode_text(&solid, &mut out).unwrap();
        let decoded = decode_text(out.as_slice()).unwrap();
        assert_eq!(decoded, solid);
    }

    #[test]
    fn absent_name_and_normal() {
        let solid = Solid::new(
            None,
            vec![Facet::from_parts(
                None,
                vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)],
            )],
        );
        let mut out = Vec::new();
        encode_text(&solid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("solid \n  facet normal 0e0 0e0 0e0\n"));

        let decoded = decode_text(text.as_bytes()).unwrap();
        assert!(decoded.name.is_none());
        assert_eq!(decoded.facets[0].normal, Some(v(0.0, 0.0, 0.0)));
    }

    #[test]
    fn precision_fixes_mantissa_digits() {
        let mut solid = Solid::default();
        solid.add_facet(
            Some(v(0.0, 0.0, 1.0)),
            [[1.0 / 3.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );
        let params = WriteParams {
            precision: Some(3),
            ..WriteParams::default()
        };
        let mut out = Vec::new();
        encode_text_with(&solid, &mut out, &params).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("vertex 3.333e-1 0.000e0 0.000e0\n"), "{text}");
        assert!(text.contains("facet normal 0.000e0 0.000e0 1.000e0\n"), "{text}");
    }

    #[test]
    fn multiline_name_rejected() {
        let solid = Solid::new(Some("two\nlines".into()), Vec::new());
        let mut out = Vec::new();
        let err = encode_text(&solid, &mut out).unwrap_err();
        assert!(matches!(
            err,
            StlError::Encode(EncodeError::MultilineName { ref name }) if name == "two\nlines"
        ));
        assert!(out.is_empty());

        let solid = Solid::new(Some("tab\tand\rreturn".into()), Vec::new());
        encode_text(&solid, &mut out).unwrap();
        let decoded = decode_text(out.as_slice()).unwrap();
        assert_eq!(decoded.name.as_deref(), Some("tab\tand\rreturn"));
    }

    #[test]
    fn short_facet_is_not_written() {
        let mut solid = Solid::default();
        solid.add_facet(None, [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        solid
            .facets
            .push(Facet::from_parts(None, vec![v(5.0, 5.0, 5.0), v(6.0, 6.0, 6.0)]));
        let params = WriteParams {
            polygons: PolygonPolicy::Triangulate,
            ..WriteParams::default()
        };
        let mut out = Vec::new();
        let err = encode_text_with(&solid, &mut out, &params).unwrap_err();
        assert!(matches!(
            err,
            StlError::Encode(EncodeError::NonTriangularFacet {
                index: 1,
                vertices: 2
            })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn polygons_follow_policy() {
        let mut solid = Solid::default();
        solid.add_facet(None, [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);

        let mut out = Vec::new();
        let err = encode_text(&solid, &mut out).unwrap_err();
        assert!(matches!(
            err,
            StlError::Encode(EncodeError::NonTriangularFacet {
                index: 0,
                vertices: 4
            })
        ));
        assert!(out.is_empty());

        let params = WriteParams {
            polygons: PolygonPolicy::Triangulate,
            ..WriteParams::default()
        };
        encode_text_with(&solid, &mut out, &params).unwrap();
        let decoded = decode_text(out.as_slice()).unwrap();
        assert_eq!(decoded.facets.len(), 2);
        assert!((decoded.surface_area() - 1.0).abs() < 1e-12);
    }
}
