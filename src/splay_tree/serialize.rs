use crate::splay_tree::SplayMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp;
use std::fmt;
use std::marker::PhantomData;

// Upper bound on the arena pre-allocation trusted from a deserializer's size hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

impl<K, V> Serialize for SplayMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct SplayMapVisitor<K, V> {
    marker: PhantomData<fn() -> SplayMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for SplayMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = SplayMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let capacity = cmp::min(access.size_hint().unwrap_or(0), MAX_PREALLOCATED_ENTRIES);
        let mut map = SplayMap::with_capacity(capacity);
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for SplayMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SplayMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::splay_tree::SplayMap;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_tokens() {
        let mut map: SplayMap<u32, char> = SplayMap::new();
        map.insert(3, 'c');
        map.insert(1, 'a');

        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Char('a'),
                Token::U32(3),
                Token::Char('c'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_tokens_empty() {
        let map: SplayMap<u32, u32> = SplayMap::new();
        assert_tokens(&map, &[Token::Map { len: Some(0) }, Token::MapEnd]);
    }

    #[test]
    fn test_de_tokens_unordered_duplicates() {
        let mut expected = SplayMap::new();
        expected.insert(1, 'z');
        expected.insert(2, 'b');

        assert_de_tokens(
            &expected,
            &[
                Token::Map { len: None },
                Token::U32(2),
                Token::Char('b'),
                Token::U32(1),
                Token::Char('a'),
                Token::U32(1),
                Token::Char('z'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_bincode_round_trip() {
        let map: SplayMap<u32, String> =
            (0..100).map(|key| (key * 7 % 100, key.to_string())).collect();

        let bytes = bincode::serialize(&map).unwrap();
        let decoded: SplayMap<u32, String> = bincode::deserialize(&bytes).unwrap();

        assert_eq!(decoded, map);
        assert_eq!(decoded.len(), 100);
        assert_eq!(decoded.root_key(), Some(&99));
    }
}
