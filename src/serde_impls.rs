//! Transparent pass-through serialization: every container encodes exactly its logical
//! contents with no extra framing, and deserialization rebuilds through the normal insertion
//! paths so dual-structure invariants are re-established.

#[cfg(any(feature = "linked", feature = "ordered"))]
mod seq {
    use std::fmt::{self, Formatter};
    use std::marker::PhantomData;

    use serde::de::{SeqAccess, Visitor};

    /// Rebuilds any `Default + Extend` collection from a sequence.
    pub(super) struct SeqVisitor<C, T> {
        pub(super) marker: PhantomData<(C, T)>,
    }

    impl<'de, C, T> Visitor<'de> for SeqVisitor<C, T>
    where
        C: Default + Extend<T>,
        T: serde::Deserialize<'de>,
    {
        type Value = C;

        fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "a sequence")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut collection = C::default();
            while let Some(value) = seq.next_element()? {
                collection.extend([value]);
            }
            Ok(collection)
        }
    }
}

#[cfg(feature = "linked")]
mod linked {
    use std::marker::PhantomData;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::seq::SeqVisitor;
    use crate::collections::linked::{LinkedList, SinglyLinkedList};

    impl<T: Serialize> Serialize for SinglyLinkedList<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T: Deserialize<'de> + Clone> Deserialize<'de> for SinglyLinkedList<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(SeqVisitor {
                marker: PhantomData,
            })
        }
    }

    impl<T: Serialize> Serialize for LinkedList<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T: Deserialize<'de> + Clone> Deserialize<'de> for LinkedList<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(SeqVisitor {
                marker: PhantomData,
            })
        }
    }
}

#[cfg(feature = "ordered")]
mod ordered {
    use std::hash::Hash;
    use std::marker::PhantomData;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::seq::SeqVisitor;
    use crate::collections::ordered::OrderedSet;

    impl<T: Serialize + Hash + Eq + Clone> Serialize for OrderedSet<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T> Deserialize<'de> for OrderedSet<T>
    where
        T: Deserialize<'de> + Hash + Eq + Clone,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(SeqVisitor {
                marker: PhantomData,
            })
        }
    }
}

#[cfg(feature = "bimap")]
mod bimap {
    use std::fmt::{self, Formatter};
    use std::hash::Hash;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::collections::bimap::BiMap;

    impl<L: Serialize, R: Serialize> Serialize for BiMap<L, R>
    where
        L: Hash + Eq + Clone,
        R: Hash + Eq + Clone,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.iter())
        }
    }

    struct BiMapVisitor<L, R> {
        marker: PhantomData<(L, R)>,
    }

    impl<'de, L, R> Visitor<'de> for BiMapVisitor<L, R>
    where
        L: Deserialize<'de> + Hash + Eq + Clone,
        R: Deserialize<'de> + Hash + Eq + Clone,
    {
        type Value = BiMap<L, R>;

        fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "a map")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut bimap = BiMap::with_cap(map.size_hint().unwrap_or(0));
            while let Some((l, r)) = map.next_entry()? {
                bimap.insert(l, r);
            }
            Ok(bimap)
        }
    }

    impl<'de, L, R> Deserialize<'de> for BiMap<L, R>
    where
        L: Deserialize<'de> + Hash + Eq + Clone,
        R: Deserialize<'de> + Hash + Eq + Clone,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(BiMapVisitor {
                marker: PhantomData,
            })
        }
    }
}

#[cfg(feature = "matrix")]
mod matrix {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::collections::matrix::Matrix;

    impl<T: Serialize> Serialize for Matrix<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.rows_iter())
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Matrix<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
            Matrix::try_from_rows(rows).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{Token, assert_tokens};

    #[cfg(feature = "linked")]
    #[test]
    fn test_linked_lists_round_trip_as_sequences() {
        use crate::collections::linked::{LinkedList, SinglyLinkedList};

        let singly: SinglyLinkedList<u32> = [1, 2, 3].into_iter().collect();
        assert_tokens(
            &singly,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );

        let doubly: LinkedList<u32> = [4, 5].into_iter().collect();
        assert_tokens(
            &doubly,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(4),
                Token::U32(5),
                Token::SeqEnd,
            ],
        );
    }

    #[cfg(feature = "ordered")]
    #[test]
    fn test_ordered_set_round_trips_in_insertion_order() {
        use crate::collections::ordered::OrderedSet;

        let set: OrderedSet<u32> = [3, 1, 2].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(3),
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }

    #[cfg(feature = "bimap")]
    #[test]
    fn test_bimap_round_trips_as_a_map() {
        use crate::collections::bimap::BiMap;

        let mut map = BiMap::new();
        map.insert(1_u32, "one".to_string());
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(1) },
                Token::U32(1),
                Token::Str("one"),
                Token::MapEnd,
            ],
        );
    }

    #[cfg(feature = "matrix")]
    #[test]
    fn test_matrix_round_trips_as_rows() {
        use crate::collections::matrix::Matrix;

        let matrix = Matrix::from_rows([[1_u32, 2], [3, 4]]);
        assert_tokens(
            &matrix,
            &[
                Token::Seq { len: Some(2) },
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
                Token::Seq { len: Some(2) },
                Token::U32(3),
                Token::U32(4),
                Token::SeqEnd,
                Token::SeqEnd,
            ],
        );
    }

    #[cfg(feature = "either")]
    #[test]
    fn test_either_serializes_transparently() {
        use crate::collections::either::Either;

        let left: Either<u32, String> = Either::Left(7);
        assert_tokens(&left, &[Token::U32(7)]);

        let right: Either<u32, String> = Either::Right("seven".to_string());
        assert_tokens(&right, &[Token::Str("seven")]);
    }
}
