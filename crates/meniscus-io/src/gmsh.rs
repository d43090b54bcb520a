//! Gmsh mesh file I/O.
//!
//! Reads and writes Gmsh MSH format version 2.2 (ASCII).
//!
//! ## Supported Element Types
//! - 1 = Line (2-node): closed curves, world dimension 2
//! - 2 = Triangle (3-node): closed surfaces, world dimension 3
//! - 15 = Point: ignored
//!
//! If a file contains triangles, line elements are ignored. Nodes not
//! referenced by any cell are dropped and the rest renumbered in file
//! order.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use meniscus_mesh::InterfaceMesh;
use meniscus_types::MeniscusError;

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unsupported Gmsh version: {0}")]
    UnsupportedVersion(String),

    #[error("Unsupported element type: {0}")]
    UnsupportedElement(i32),

    #[error("Missing section: {0}")]
    MissingSection(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeniscusError),
}

impl From<GmshError> for MeniscusError {
    fn from(e: GmshError) -> Self {
        match e {
            GmshError::IoError(e) => MeniscusError::Io(e),
            GmshError::InvalidMesh(e) => e,
            other => MeniscusError::Parse(other.to_string()),
        }
    }
}

/// An interface mesh with the physical tag of every cell.
#[derive(Debug, Clone)]
pub struct GmshInterface {
    pub mesh: InterfaceMesh,
    pub physical_tags: Vec<u32>,
}

/// Upper bound on capacity reserved from a section count in the file.
const MAX_PREALLOCATED_NODES: usize = 1 << 20;

struct RawElement {
    nodes: Vec<usize>,
    physical_tag: u32,
}

/// Read a Gmsh MSH file (format 2.2).
pub fn read_gmsh(path: &Path) -> Result<GmshInterface, GmshError> {
    let file = File::open(path)?;
    parse_gmsh(BufReader::new(file))
}

/// Parse MSH 2.2 content from any buffered reader.
pub fn parse_gmsh<R: BufRead>(reader: R) -> Result<GmshInterface, GmshError> {
    let mut lines = reader.lines();
    let mut nodes: Option<Vec<(usize, [f64; 3])>> = None;
    let mut lines_2: Vec<RawElement> = Vec::new();
    let mut triangles: Vec<RawElement> = Vec::new();
    let mut saw_format = false;

    while let Some(line_result) = lines.next() {
        let line = line_result?;
        let line = line.trim();

        if line.starts_with("$MeshFormat") {
            parse_mesh_format(&mut lines)?;
            saw_format = true;
        } else if line.starts_with("$Nodes") {
            nodes = Some(parse_nodes(&mut lines)?);
        } else if line.starts_with("$Elements") {
            let (l, t) = parse_elements(&mut lines)?;
            lines_2 = l;
            triangles = t;
        }
    }

    if !saw_format {
        return Err(GmshError::MissingSection("MeshFormat".to_string()));
    }
    let nodes = nodes.ok_or_else(|| GmshError::MissingSection("Nodes".to_string()))?;

    let (world_dim, elements) = if !triangles.is_empty() {
        (3, triangles)
    } else if !lines_2.is_empty() {
        (2, lines_2)
    } else {
        return Err(GmshError::MissingSection(
            "Elements (lines or triangles)".to_string(),
        ));
    };

    build_interface(world_dim, &nodes, elements)
}

/// Parse the $MeshFormat section.
fn parse_mesh_format<I>(lines: &mut I) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = match lines.next() {
        Some(line) => line?,
        None => return Err(GmshError::ParseError("Empty MeshFormat section".to_string())),
    };
    let parts: Vec<&str> = line.split_whitespace().collect();
    let version = parts
        .first()
        .ok_or_else(|| GmshError::ParseError("Empty MeshFormat line".to_string()))?;
    if !version.starts_with("2.") {
        return Err(GmshError::UnsupportedVersion(version.to_string()));
    }
    if parts.get(1).is_some_and(|&file_type| file_type != "0") {
        return Err(GmshError::UnsupportedVersion(format!(
            "{version} (binary)"
        )));
    }
    skip_to(lines, "$EndMeshFormat")
}

/// Parse the $Nodes section into `(id, [x, y, z])`.
fn parse_nodes<I>(lines: &mut I) -> Result<Vec<(usize, [f64; 3])>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_nodes: usize = parse_count(lines, "node")?;
    let mut nodes = Vec::with_capacity(n_nodes.min(MAX_PREALLOCATED_NODES));

    for _ in 0..n_nodes {
        let line = next_line(lines, "node")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(GmshError::ParseError(format!("Invalid node line: {line}")));
        }
        // Format: node_id x y z
        let id: usize = parse_field(parts[0], "node id")?;
        let mut x = [0.0; 3];
        for (slot, part) in x.iter_mut().zip(&parts[1..4]) {
            *slot = parse_field(part, "coordinate")?;
        }
        nodes.push((id, x));
    }

    skip_to(lines, "$EndNodes")?;
    Ok(nodes)
}

/// Parse the $Elements section. Returns (lines, triangles).
fn parse_elements<I>(lines: &mut I) -> Result<(Vec<RawElement>, Vec<RawElement>), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let n_elements: usize = parse_count(lines, "element")?;
    let mut segments = Vec::new();
    let mut triangles = Vec::new();

    for _ in 0..n_elements {
        let line = next_line(lines, "element")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(GmshError::ParseError(format!("Invalid element line: {line}")));
        }

        // Format: elem_id elem_type n_tags tag1 ... tagN node1 node2 ...
        let elem_type: i32 = parse_field(parts[1], "element type")?;
        let n_tags: usize = parse_field(parts[2], "tag count")?;
        let physical_tag = if n_tags > 0 && parts.len() > 3 {
            parse_field::<u32>(parts[3], "physical tag")?
        } else {
            0
        };
        let node_count = match elem_type {
            1 => 2,
            2 => 3,
            15 => continue,
            other => return Err(GmshError::UnsupportedElement(other)),
        };
        let node_start = 3 + n_tags.min(parts.len());
        let node_end = node_start + node_count;
        if parts.len() < node_end {
            return Err(GmshError::ParseError(format!(
                "Element needs {n_tags} tags and {node_count} nodes: {line}"
            )));
        }
        let nodes = parts[node_start..node_end]
            .iter()
            .map(|p| parse_field::<usize>(p, "element node"))
            .collect::<Result<Vec<_>, _>>()?;

        let element = RawElement {
            nodes,
            physical_tag,
        };
        if node_count == 2 {
            segments.push(element);
        } else {
            triangles.push(element);
        }
    }

    skip_to(lines, "$EndElements")?;
    Ok((segments, triangles))
}

fn build_interface(
    world_dim: usize,
    nodes: &[(usize, [f64; 3])],
    elements: Vec<RawElement>,
) -> Result<GmshInterface, GmshError> {
    let position: HashMap<usize, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, &(id, _))| (id, i))
        .collect();

    // Renumber referenced nodes in file order.
    let mut used = vec![false; nodes.len()];
    for element in &elements {
        for id in &element.nodes {
            let &i = position
                .get(id)
                .ok_or_else(|| GmshError::ParseError(format!("Element references unknown node {id}")))?;
            used[i] = true;
        }
    }
    let mut new_index = vec![u32::MAX; nodes.len()];
    let mut coords = Vec::new();
    let mut next = 0u32;
    for (i, &(id, x)) in nodes.iter().enumerate() {
        if !used[i] {
            continue;
        }
        if world_dim == 2 && x[2] != 0.0 {
            return Err(GmshError::ParseError(format!(
                "Node {id} of a curve mesh has z = {} (curves must lie in the z = 0 plane)",
                x[2]
            )));
        }
        coords.extend_from_slice(&x[..world_dim]);
        new_index[i] = next;
        next += 1;
    }

    let mut cells = Vec::with_capacity(elements.len() * world_dim);
    let mut physical_tags = Vec::with_capacity(elements.len());
    for element in elements {
        for id in &element.nodes {
            cells.push(new_index[position[id]]);
        }
        physical_tags.push(element.physical_tag);
    }

    let mesh = InterfaceMesh::new(world_dim, coords, cells)?;
    Ok(GmshInterface {
        mesh,
        physical_tags,
    })
}

/// Write a Gmsh MSH file (format 2.2).
///
/// `physical_tags`, if given, must have one entry per cell; otherwise all
/// cells get tag 1.
pub fn write_gmsh(path: &Path, mesh: &InterfaceMesh, physical_tags: Option<&[u32]>) -> Result<(), GmshError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_gmsh_to(&mut writer, mesh, physical_tags)?;
    writer.flush()?;
    Ok(())
}

/// Write MSH 2.2 content to any writer.
pub fn write_gmsh_to<W: Write>(
    writer: &mut W,
    mesh: &InterfaceMesh,
    physical_tags: Option<&[u32]>,
) -> Result<(), GmshError> {
    if let Some(tags) = physical_tags {
        if tags.len() != mesh.cell_count() {
            return Err(GmshError::InvalidMesh(MeniscusError::DimensionMismatch {
                context: "gmsh physical tags",
                expected: mesh.cell_count(),
                found: tags.len(),
            }));
        }
    }

    writeln!(writer, "$MeshFormat")?;
    writeln!(writer, "2.2 0 8")?;
    writeln!(writer, "$EndMeshFormat")?;

    writeln!(writer, "$Nodes")?;
    writeln!(writer, "{}", mesh.vertex_count())?;
    for v in 0..mesh.vertex_count() {
        let p = mesh.position(v);
        writeln!(writer, "{} {:?} {:?} {:?}", v + 1, p.x, p.y, p.z)?;
    }
    writeln!(writer, "$EndNodes")?;

    let elem_type = if mesh.world_dim() == 2 { 1 } else { 2 };
    writeln!(writer, "$Elements")?;
    writeln!(writer, "{}", mesh.cell_count())?;
    for c in 0..mesh.cell_count() {
        let tag = physical_tags.map_or(1, |tags| tags[c]);
        // Format: elem_id type n_tags physical_tag geometrical_tag nodes...
        write!(writer, "{} {} 2 {} {}", c + 1, elem_type, tag, tag)?;
        for &v in mesh.cell(c) {
            write!(writer, " {}", v + 1)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "$EndElements")?;
    Ok(())
}

fn next_line<I>(lines: &mut I, what: &str) -> Result<String, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(GmshError::ParseError(format!("Unexpected end of file in {what} section"))),
    }
}

fn parse_count<I>(lines: &mut I, what: &str) -> Result<usize, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = next_line(lines, what)?;
    line.parse()
        .map_err(|_| GmshError::ParseError(format!("Invalid {what} count: {line}")))
}

fn parse_field<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, GmshError> {
    s.parse()
        .map_err(|_| GmshError::ParseError(format!("Invalid {what}: {s}")))
}

/// Skip to the end marker of the current section.
fn skip_to<I>(lines: &mut I, end: &str) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    for line_result in lines.by_ref() {
        if line_result?.trim().starts_with(end) {
            return Ok(());
        }
    }
    Err(GmshError::ParseError(format!("Missing {end}")))
}
