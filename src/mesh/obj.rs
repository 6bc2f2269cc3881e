//! Wavefront OBJ subset parser.
//!
//! The format is the narrow slice the heart models were exported with:
//! `v x y z` vertex positions, `vn x y z` normals, and triangular
//! `f v//vn v//vn v//vn` faces with 1-based indices and no texture
//! coordinates. Geometry lines precede face lines; anything else is
//! ignored. Float tokens may use either `.` or `,` as the decimal
//! separator (some exporters write under a comma locale), and both are
//! parsed locale-independently.

use std::fmt;
use std::path::Path;

use glam::Vec3;

use super::TriangleMesh;
use crate::error::HeartError;

/// Structured failure raised while parsing a model file.
///
/// Any malformed line aborts the whole import; no partial mesh is ever
/// returned. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjError {
    /// A `v`/`vn` declaration with fewer than three numeric tokens.
    MissingTokens {
        /// 1-based source line.
        line: usize,
        /// The declaration marker on the offending line.
        directive: &'static str,
    },
    /// A coordinate token that does not parse as a float.
    InvalidFloat {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A face index token that does not parse as a positive integer.
    InvalidIndex {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A face record not of the form `vertex//normal`.
    MalformedFaceRecord {
        /// 1-based source line.
        line: usize,
        /// The offending record.
        record: String,
    },
    /// A face with an arity other than three vertex records.
    UnsupportedFaceArity {
        /// 1-based source line.
        line: usize,
        /// Number of records found on the line.
        count: usize,
    },
    /// A face referencing a vertex that was never declared.
    VertexIndexOutOfRange {
        /// 1-based source line.
        line: usize,
        /// The 1-based index as written in the file.
        index: usize,
        /// Number of vertices declared before the face section.
        count: usize,
    },
    /// A face referencing a normal that was never declared.
    NormalIndexOutOfRange {
        /// 1-based source line.
        line: usize,
        /// The 1-based index as written in the file.
        index: usize,
        /// Number of normals declared before the face section.
        count: usize,
    },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTokens { line, directive } => write!(
                f,
                "line {line}: `{directive}` declaration needs three numeric tokens"
            ),
            Self::InvalidFloat { line, token } => {
                write!(f, "line {line}: cannot parse `{token}` as a coordinate")
            }
            Self::InvalidIndex { line, token } => {
                write!(f, "line {line}: cannot parse `{token}` as a face index")
            }
            Self::MalformedFaceRecord { line, record } => write!(
                f,
                "line {line}: face record `{record}` is not of the form vertex//normal"
            ),
            Self::UnsupportedFaceArity { line, count } => write!(
                f,
                "line {line}: face has {count} vertex records, only triangles are supported"
            ),
            Self::VertexIndexOutOfRange { line, index, count } => write!(
                f,
                "line {line}: vertex index {index} out of range ({count} declared)"
            ),
            Self::NormalIndexOutOfRange { line, index, count } => write!(
                f,
                "line {line}: normal index {index} out of range ({count} declared)"
            ),
        }
    }
}

impl std::error::Error for ObjError {}

impl TriangleMesh {
    /// Parses OBJ source text into a mesh.
    ///
    /// Runs in two strictly ordered phases over one line cursor: geometry
    /// declarations first, then faces from the first `f` line onward. A
    /// vertex referenced by several faces with different normals keeps the
    /// last normal written; such overwrites are counted and reported with
    /// a single warning.
    pub fn from_obj_text(source: &str) -> Result<Self, ObjError> {
        let lines: Vec<&str> = source.lines().collect();
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();

        // Phase 1: geometry. Leaves the cursor on the first face line.
        let mut cursor = 0;
        while cursor < lines.len() {
            let mut tokens = lines[cursor].split_whitespace();
            match tokens.next() {
                Some("vn") => {
                    normals.push(parse_vec3(&mut tokens, cursor + 1, "vn")?);
                }
                Some(t) if t.starts_with('v') => {
                    vertices.push(parse_vec3(&mut tokens, cursor + 1, "v")?);
                }
                Some(t) if t.starts_with('f') => break,
                _ => {}
            }
            cursor += 1;
        }

        // Phase 2: faces. Normal slots default to zero until a face
        // assigns them; `written` distinguishes a written zero normal
        // from an untouched slot.
        let mut normals_per_vertex = vec![Vec3::ZERO; vertices.len()];
        let mut written = vec![false; vertices.len()];
        let mut triangle_indices: Vec<u32> = Vec::new();
        let mut overwrites = 0usize;

        while cursor < lines.len() {
            let mut tokens = lines[cursor].split_whitespace();
            if tokens.next().is_some_and(|t| t.starts_with('f')) {
                let records: Vec<&str> = tokens.collect();
                if records.len() != 3 {
                    return Err(ObjError::UnsupportedFaceArity {
                        line: cursor + 1,
                        count: records.len(),
                    });
                }
                for record in records {
                    let (vertex, normal) = parse_face_record(
                        record,
                        cursor + 1,
                        vertices.len(),
                        normals.len(),
                    )?;
                    if written[vertex] && normals_per_vertex[vertex] != normals[normal] {
                        overwrites += 1;
                    }
                    written[vertex] = true;
                    normals_per_vertex[vertex] = normals[normal];
                    triangle_indices.push(vertex as u32);
                }
            }
            cursor += 1;
        }

        if overwrites > 0 {
            log::warn!(
                "{overwrites} face reference(s) overwrote a vertex normal with a \
                 different value; keeping the last one seen"
            );
        }

        Ok(Self {
            vertices,
            normals_per_vertex,
            triangle_indices,
        })
    }

    /// Reads and parses a model file.
    pub fn from_obj_file<P: AsRef<Path>>(path: P) -> Result<Self, HeartError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let mesh = Self::from_obj_text(&text)?;
        log::info!(
            "loaded {}: {} vertices, {} triangles",
            path.as_ref().display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Parses three float tokens from a geometry declaration. Extra trailing
/// tokens (e.g. a `w` component) are ignored.
fn parse_vec3<'a, I>(
    tokens: &mut I,
    line: usize,
    directive: &'static str,
) -> Result<Vec3, ObjError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = [0.0f32; 3];
    for slot in &mut out {
        let token = tokens
            .next()
            .ok_or(ObjError::MissingTokens { line, directive })?;
        *slot = parse_float(token, line)?;
    }
    Ok(Vec3::from_array(out))
}

/// Locale-independent float parse accepting `,` as a decimal separator.
fn parse_float(token: &str, line: usize) -> Result<f32, ObjError> {
    let parsed = if token.contains(',') {
        token.replace(',', ".").parse::<f32>()
    } else {
        token.parse::<f32>()
    };
    parsed.map_err(|_| ObjError::InvalidFloat {
        line,
        token: token.to_owned(),
    })
}

/// Parses one `vertex//normal` record into bounds-checked 0-based indices.
fn parse_face_record(
    record: &str,
    line: usize,
    vertex_count: usize,
    normal_count: usize,
) -> Result<(usize, usize), ObjError> {
    let Some((v_token, n_token)) = record.split_once("//") else {
        return Err(ObjError::MalformedFaceRecord {
            line,
            record: record.to_owned(),
        });
    };
    let v_index = parse_index(v_token, line)?;
    let n_index = parse_index(n_token, line)?;
    let vertex = v_index
        .checked_sub(1)
        .filter(|i| *i < vertex_count)
        .ok_or(ObjError::VertexIndexOutOfRange {
            line,
            index: v_index,
            count: vertex_count,
        })?;
    let normal = n_index
        .checked_sub(1)
        .filter(|i| *i < normal_count)
        .ok_or(ObjError::NormalIndexOutOfRange {
            line,
            index: n_index,
            count: normal_count,
        })?;
    Ok((vertex, normal))
}

fn parse_index(token: &str, line: usize) -> Result<usize, ObjError> {
    token.parse().map_err(|_| ObjError::InvalidIndex {
        line,
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_TRIANGLE: &str = "v 0.0 0.0 0.0\n\
                                      v 1.0 0.0 0.0\n\
                                      v 0.0 1.0 0.0\n\
                                      vn 0.0 0.0 1.0\n\
                                      f 1//1 2//1 3//1\n";

    #[test]
    fn parses_reference_triangle() {
        let mesh = TriangleMesh::from_obj_text(REFERENCE_TRIANGLE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[1], Vec3::X);
        assert_eq!(mesh.triangle_indices, vec![0, 1, 2]);
        assert!(mesh.normals_per_vertex.iter().all(|n| *n == Vec3::Z));
    }

    #[test]
    fn lengths_match_declaration_counts() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
                    vn 0 0 1\nvn 0 0 -1\n\
                    f 1//1 2//1 3//1\nf 2//2 4//2 3//2\n";
        let mesh = TriangleMesh::from_obj_text(text).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.normals_per_vertex.len(), 4);
        assert_eq!(mesh.triangle_indices.len(), 6);
        assert!(mesh.triangle_indices.iter().all(|i| (*i as usize) < 4));
    }

    #[test]
    fn ignores_unrelated_directives() {
        let text = "# exported heart\no heart\ns off\nusemtl none\n\
                    v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = TriangleMesh::from_obj_text(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn accepts_comma_decimal_separators() {
        let dotted = TriangleMesh::from_obj_text(
            "v 0.5 -1.25 2.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nvn 0.0 0.0 1.0\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        let comma = TriangleMesh::from_obj_text(
            "v 0,5 -1,25 2,0\nv 1,0 0,0 0,0\nv 0,0 1,0 0,0\nvn 0,0 0,0 1,0\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        assert_eq!(dotted, comma);
    }

    #[test]
    fn extra_tokens_after_coordinates_are_ignored() {
        let mesh =
            TriangleMesh::from_obj_text("v 1 2 3 1.0\nvn 0 1 0 extra\n").unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn empty_input_yields_empty_mesh() {
        let mesh = TriangleMesh::from_obj_text("").unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.triangle_indices.is_empty());
    }

    #[test]
    fn short_vertex_line_fails() {
        let err = TriangleMesh::from_obj_text("v 1.0 2.0\n").unwrap_err();
        assert_eq!(
            err,
            ObjError::MissingTokens {
                line: 1,
                directive: "v"
            }
        );
    }

    #[test]
    fn short_normal_line_fails() {
        let err = TriangleMesh::from_obj_text("vn\n").unwrap_err();
        assert_eq!(
            err,
            ObjError::MissingTokens {
                line: 1,
                directive: "vn"
            }
        );
    }

    #[test]
    fn unparseable_coordinate_fails() {
        let err = TriangleMesh::from_obj_text("v 1.0 two 3.0\n").unwrap_err();
        assert!(matches!(err, ObjError::InvalidFloat { line: 1, .. }));
    }

    #[test]
    fn vertex_index_out_of_range_fails() {
        let text = "v 0 0 0\nvn 0 0 1\nf 1//1 2//1 1//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert_eq!(
            err,
            ObjError::VertexIndexOutOfRange {
                line: 3,
                index: 2,
                count: 1
            }
        );
    }

    #[test]
    fn normal_index_out_of_range_fails() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//2 3//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert_eq!(
            err,
            ObjError::NormalIndexOutOfRange {
                line: 5,
                index: 2,
                count: 1
            }
        );
    }

    #[test]
    fn zero_face_index_fails() {
        let text = "v 0 0 0\nvn 0 0 1\nf 0//1 1//1 1//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert!(matches!(err, ObjError::VertexIndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn negative_face_index_fails() {
        let text = "v 0 0 0\nvn 0 0 1\nf -1//1 1//1 1//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert!(matches!(err, ObjError::InvalidIndex { line: 3, .. }));
    }

    #[test]
    fn texture_coordinate_slot_fails() {
        let text = "v 0 0 0\nvn 0 0 1\nf 1/1/1 1//1 1//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert!(matches!(err, ObjError::MalformedFaceRecord { line: 3, .. }));
    }

    #[test]
    fn quad_face_fails() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\n\
                    f 1//1 2//1 3//1 4//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert_eq!(
            err,
            ObjError::UnsupportedFaceArity { line: 6, count: 4 }
        );
    }

    #[test]
    fn two_record_face_fails() {
        let text = "v 0 0 0\nvn 0 0 1\nf 1//1 1//1\n";
        let err = TriangleMesh::from_obj_text(text).unwrap_err();
        assert_eq!(
            err,
            ObjError::UnsupportedFaceArity { line: 3, count: 2 }
        );
    }

    #[test]
    fn conflicting_normal_writes_keep_last_value() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
                    vn 0 0 1\nvn 1 0 0\n\
                    f 1//1 2//1 3//1\nf 2//2 4//2 3//2\n";
        let mesh = TriangleMesh::from_obj_text(text).unwrap();
        assert_eq!(mesh.normals_per_vertex[0], Vec3::Z);
        assert_eq!(mesh.normals_per_vertex[1], Vec3::X);
        assert_eq!(mesh.normals_per_vertex[2], Vec3::X);
    }

    #[test]
    fn geometry_after_face_section_is_ignored() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\n\
                    f 1//1 2//1 3//1\nv 9 9 9\n";
        let mesh = TriangleMesh::from_obj_text(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }
}
