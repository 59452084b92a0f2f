use std::hash::BuildHasherDefault;
use std::marker::PhantomData;

use intaglio::Symbol;
use rustc_hash::FxHasher;

/// Hash builder that replaces the default hashing algorithm used by string
/// pools (the same one used by [`std::collections::HashMap`]) with a faster
/// one [`rustc_hash::FxHasher`].
///
/// For more information see:
/// https://nnethercote.github.io/perf-book/hashing.html
type HashBuilder = BuildHasherDefault<FxHasher>;

/// StringPool is a data structure for interning the literals of token
/// expressions.
///
/// For each interned string the pool returns an ID of type `T`, that can be
/// used for retrieving the string again. A single copy of each string is
/// stored in the pool, so the token `"foo"` and the suffix `"foo"` left
/// behind by deriving `"xfoo"` share the same ID.
///
/// The type `T` must be convertible from and into `u32`.
pub(crate) struct StringPool<T>
where
    T: From<u32> + Into<u32>,
{
    pool: intaglio::SymbolTable<HashBuilder>,
    phantom: PhantomData<T>,
}

impl<T> StringPool<T>
where
    T: From<u32> + Into<u32>,
{
    /// Creates a new [`StringPool`].
    pub fn new() -> Self {
        Self {
            pool: intaglio::SymbolTable::with_hasher(HashBuilder::default()),
            phantom: Default::default(),
        }
    }

    /// Returns the ID corresponding to the string `s`. Interns the string
    /// if not already interned.
    #[inline]
    pub fn get_or_intern(&mut self, s: &str) -> T {
        if let Some(s) = self.pool.check_interned(s) {
            T::from(s.id())
        } else {
            T::from(
                self.pool
                    .intern(s.to_string())
                    .expect("too many distinct token literals")
                    .id(),
            )
        }
    }

    /// Returns the string corresponding to a given `id`. IDs are only
    /// handed out by [`StringPool::get_or_intern`], so an unknown ID is
    /// treated as the empty literal.
    #[inline]
    pub fn get(&self, id: T) -> &str {
        self.pool.get(Symbol::from(id.into())).unwrap_or_default()
    }
}
