extern crate obj_stream;
extern crate pretty_assertions;

use obj_stream::obj::{self, FaceIndex, ObjSink, Statistics};
use obj_stream::ParseError;
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, PartialEq)]
enum Event {
  Vertex(f64, f64, f64, f64),
  Texture(f64, f64, f64),
  Normal(f64, f64, f64),
  Parameter(f64, f64, f64),
  Face(Vec<(i64, i64, i64)>),
}

#[derive(Default)]
struct Events(Vec<Event>);

impl ObjSink for Events {
  fn on_vertex(&mut self, x: f64, y: f64, z: f64, w: f64) {
    self.0.push(Event::Vertex(x, y, z, w));
  }
  fn on_texture(&mut self, u: f64, v: f64, w: f64) {
    self.0.push(Event::Texture(u, v, w));
  }
  fn on_normal(&mut self, x: f64, y: f64, z: f64) {
    self.0.push(Event::Normal(x, y, z));
  }
  fn on_parameter(&mut self, u: f64, v: f64, w: f64) {
    self.0.push(Event::Parameter(u, v, w));
  }
  fn on_face(&mut self, corners: &[FaceIndex], _counts: &Statistics) {
    self
      .0
      .push(Event::Face(corners.iter().map(|c| (c.vertex, c.texture, c.normal)).collect()));
  }
}

fn events(input: &str) -> (Vec<Event>, Statistics) {
  let mut sink = Events::default();
  let stats = obj::parse(input, &mut sink).unwrap();
  (sink.0, stats)
}

#[test]
fn single_vertex_gets_default_w() {
  let (ev, stats) = events("v 1.0 2.0 3.0\n");
  assert_eq!(ev, vec![Event::Vertex(1.0, 2.0, 3.0, 1.0)]);
  assert_eq!(stats.vertices, 1);
}

#[test]
fn texture_vertex_gets_default_w() {
  let (ev, stats) = events("vt 0.5 0.25\n");
  assert_eq!(ev, vec![Event::Texture(0.5, 0.25, 1.0)]);
  assert_eq!(stats.textures, 1);
}

#[test]
fn plain_face() {
  let (ev, _) = events("f 1 2 3\n");
  assert_eq!(ev, vec![Event::Face(vec![(1, 0, 0), (2, 0, 0), (3, 0, 0)])]);
}

#[test]
fn mixed_face_groups() {
  let (ev, _) = events("f 1/2/3 4//5 6\n");
  assert_eq!(ev, vec![Event::Face(vec![(1, 2, 3), (4, 0, 5), (6, 0, 0)])]);
}

#[test]
fn dangling_separators_do_not_merge_corners() {
  let (ev, _) = events("f 1/ 2// 3\n");
  assert_eq!(ev, vec![Event::Face(vec![(1, 0, 0), (2, 0, 0), (3, 0, 0)])]);
}

#[test]
fn comment_line_emits_nothing() {
  let (ev, _) = events("# a comment\nv 1 2 3\n");
  assert_eq!(ev, vec![Event::Vertex(1.0, 2.0, 3.0, 1.0)]);
}

#[test]
fn group_line_is_skipped_entirely() {
  let (ev, stats) = events("g mygroup extra text\nv 1 2 3\n");
  assert_eq!(ev, vec![Event::Vertex(1.0, 2.0, 3.0, 1.0)]);
  assert_eq!(stats.vertices, 1);
}

#[test]
fn uppercase_keyword_is_not_a_vertex() {
  let (ev, stats) = events("V 1 2 3\n");
  assert_eq!(ev, Vec::<Event>::new());
  assert_eq!(stats, Statistics::default());
}

#[test]
fn small_cube_file() {
  let input = "\
# Blender v2.79 OBJ File
mtllib cube.mtl
o Cube
v 1.000000 -1.000000 -1.000000
v 1.000000 -1.000000 1.000000
v -1.000000 -1.000000 1.000000
v -1.000000 -1.000000 -1.000000
vt 0.0 0.0
vt 1.0 0.0
vn 0.0000 -1.0000 0.0000
vp 0.5 0.5
usemtl Material.001
s off
f 1/1/1 2/2/1 3/1/1 4/2/1
";
  let (ev, stats) = events(input);
  assert_eq!(
    stats,
    Statistics {
      vertices: 4,
      textures: 2,
      normals: 1,
      parameters: 1,
      faces: 1,
    }
  );
  assert_eq!(ev[2], Event::Vertex(-1.0, -1.0, 1.0, 1.0));
  assert_eq!(ev[4], Event::Texture(0.0, 0.0, 1.0));
  assert_eq!(ev[6], Event::Normal(0.0, -1.0, 0.0));
  assert_eq!(ev[7], Event::Parameter(0.5, 0.5, 0.0));
  assert_eq!(
    ev[8],
    Event::Face(vec![(1, 1, 1), (2, 2, 1), (3, 1, 1), (4, 2, 1)])
  );
  assert_eq!(ev.len(), 9);
}

#[test]
fn missing_trailing_newline() {
  let (ev, _) = events("v 1 2 3\nf 1 1 1");
  assert_eq!(
    ev,
    vec![
      Event::Vertex(1.0, 2.0, 3.0, 1.0),
      Event::Face(vec![(1, 0, 0), (1, 0, 0), (1, 0, 0)]),
    ]
  );
}

#[test]
fn errors_carry_their_line() {
  let mut sink = Events::default();
  let err = obj::parse("v 1 2 3\nvn 1 x 3\n", &mut sink).unwrap_err();
  match err {
    ParseError::UnexpectedToken { .. } => {}
    ref other => panic!("expected a token mismatch, got {:?}", other),
  }
  assert_eq!(err.line_number(), Some(2));
  assert_eq!(sink.0.len(), 1);
}

#[test]
fn reader_and_string_agree() {
  let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
  let (from_str, _) = events(input);

  let mut sink = Events::default();
  obj::parse_reader(input.as_bytes(), &mut sink).unwrap();
  assert_eq!(sink.0, from_str);
}
