use enum_map::*;
use enum_map_derive::Enumerable;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enumerable)]
pub enum Element {
  Air,
  Earth,
  Water,
  Fire,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enumerable)]
pub enum TrafficLight {
  RedLight,
  AmberLight,
  GreenLight,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enumerable)]
pub enum Ten {
  Zero,
  One,
  Two,
  Three,
  Four,
  Five,
  Six,
  Seven,
  Eight,
  Nine,
}

fn check_enumerable<K: Enumerable, const N: usize>() {
  let mut iter = K::iter();
  for i in 0..N {
    let k = iter.next().unwrap();
    assert_eq!(k.ordinal(), i);
  }
  assert!(iter.next().is_none());
  assert_eq!(K::iter().count(), N);
}

#[test]
fn trait_contract() {
  check_enumerable::<bool, 2>();
  check_enumerable::<u8, 256>();
  check_enumerable::<Element, { Element::count() }>();
  check_enumerable::<TrafficLight, { TrafficLight::count() }>();
  check_enumerable::<Ten, { Ten::count() }>();
  check_enumerable::<Option<Element>, { Element::count() + 1 }>();
  check_enumerable::<Option<bool>, 3>();
}

#[test]
fn count_matches_member_count() {
  assert_eq!(Element::count(), 4);
  assert_eq!(Ten::count(), 10);
  assert_eq!(<Ten as Enumerable>::COUNT, 10);
}

#[test]
fn generated_iterator_is_double_ended() {
  let forward: Vec<_> = Element::iter().collect();
  assert_eq!(
    forward,
    vec![Element::Air, Element::Earth, Element::Water, Element::Fire]
  );
  let backward: Vec<_> = Element::iter().rev().collect();
  assert_eq!(
    backward,
    vec![Element::Fire, Element::Water, Element::Earth, Element::Air]
  );
  let mut iter = Element::iter();
  assert_eq!(iter.len(), 4);
  assert_eq!(iter.next(), Some(Element::Air));
  assert_eq!(iter.next_back(), Some(Element::Fire));
  assert_eq!(iter.len(), 2);
  assert_eq!(iter.next(), Some(Element::Earth));
  assert_eq!(iter.next_back(), Some(Element::Water));
  assert_eq!(iter.next(), None);
  assert_eq!(iter.next(), None);
  assert_eq!(iter.len(), 0);
}

#[test]
fn generated_iterator_nth_skips() {
  let mut iter = Element::iter();
  assert_eq!(iter.nth(2), Some(Element::Water));
  assert_eq!(iter.next(), Some(Element::Fire));
  assert_eq!(iter.next(), None);
}

#[test]
fn named_accessors_read_and_write() {
  let mut map = EnumMap::<Element, i32, { Element::count() }>::default();
  map.set_water(4);
  *map.air_mut() += 3;
  assert_eq!(map.water(), &4);
  assert_eq!(map.air(), &3);
  assert_eq!(map.earth(), &0);
  assert_eq!(map[Element::Water], 4);
}

#[test]
fn named_accessors_snake_case_members() {
  let mut map = EnumMap::<TrafficLight, u8, { TrafficLight::count() }>::default();
  map.set_amber_light(1);
  assert_eq!(map.amber_light(), &1);
  assert_eq!(map.red_light(), &0);
}

#[test]
fn named_accessors_on_shared_borrow() {
  let map: EnumMap<Element, i32, { Element::count() }> = enum_map![Element::Fire, 9];
  let shared = &map;
  assert_eq!(shared.fire(), &9);
  assert_eq!(shared.water(), &0);
}

#[test]
fn element_wise_scenario() {
  type Map = EnumMap<Element, i32, { Element::count() }>;
  let a: Map = enum_map![Element::Water, 4, Element::Air, 3];
  let b: Map = enum_map![Element::Water, 5, Element::Fire, 2];
  assert_eq!(
    (a + b).iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(),
    vec![
      (Element::Air, 3),
      (Element::Earth, 0),
      (Element::Water, 9),
      (Element::Fire, 2)
    ]
  );
  assert_eq!(
    (a - b).iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(),
    vec![
      (Element::Air, 3),
      (Element::Earth, 0),
      (Element::Water, -1),
      (Element::Fire, -2)
    ]
  );
  assert_eq!((a - b) + b, a);
}

#[test]
fn sequence_length_is_validated() {
  type Map = EnumMap<Ten, u8, { Ten::count() }>;
  assert!(Map::try_from_values(0..10).is_ok());
  assert_eq!(
    Map::try_from_values(0..3).unwrap_err(),
    LengthMismatch { expected: 10, actual: 3 }
  );
  assert_eq!(
    Map::try_from_values(0..12).unwrap_err(),
    LengthMismatch { expected: 10, actual: 12 }
  );
}
