//! Tools for gas instrumentalization

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gas unit cost that embeds a unit price and operations count.
///
/// The operations count will be the argument of every variant except
/// `Accumulated`, that will hold the total acumulated gas.
pub enum GasUnit {
    /// Atomic operation.
    Atom(u64),
    /// Field addition, subtraction or comparison.
    Arithmetic(u64),
    /// Field multiplication or inversion.
    ArithmeticExpensive(u64),
    /// Branching cost.
    Branching(u64),
    /// Cost of memory read, per word.
    MemoryRead(u64),
    /// Cost of memory write, per word.
    MemoryWrite(u64),
    /// Cost to read a public storage slot.
    StorageRead(u64),
    /// Cost to write a public storage slot.
    StorageWrite(u64),
    /// Fixed cost of a nested call, excluding the gas forwarded to the callee.
    Call(u64),
    /// Cost to emit a note hash, nullifier, log or L1 message.
    SideEffect(u64),
    /// Accumulated cost of several operations.
    Accumulated(u64),
}

impl GasUnit {
    /// Return the `cost := price · N`.
    pub const fn cost(&self) -> u64 {
        use GasUnit::*;

        match self {
            Atom(n) | Arithmetic(n) | ArithmeticExpensive(n) | Branching(n) | MemoryRead(n) | MemoryWrite(n)
            | StorageRead(n) | StorageWrite(n) | Call(n) | SideEffect(n) => (*n).saturating_mul(self.unit_price()),
            Accumulated(c) => *c,
        }
    }

    /// Return the price per unit.
    pub const fn unit_price(&self) -> u64 {
        use GasUnit::*;

        match self {
            // base price for pc inc
            Atom(_) => 1,
            Arithmetic(_) => 3,
            // multiplication and the modular inversion of DIV
            ArithmeticExpensive(_) => 20,
            Branching(_) => 2,
            MemoryRead(_) => 1,
            MemoryWrite(_) => 2,
            StorageRead(_) => 50,
            StorageWrite(_) => 100,
            Call(_) => 200,
            SideEffect(_) => 80,
            // accumulated cost for different operations
            Accumulated(c) => *c,
        }
    }

    /// Combine two gas computations, accumulating their cost.
    pub const fn join(self, other: Self) -> Self {
        Self::Accumulated(self.cost().saturating_add(other.cost()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_is_price_times_count() {
        assert_eq!(GasUnit::Arithmetic(4).cost(), 4 * GasUnit::Arithmetic(1).unit_price());
        assert_eq!(GasUnit::Accumulated(17).cost(), 17);
        assert_eq!(GasUnit::Atom(0).cost(), 0);
    }

    #[test]
    fn join_accumulates() {
        let joined = GasUnit::MemoryRead(2).join(GasUnit::MemoryWrite(1)).join(GasUnit::Atom(3));

        assert_eq!(joined, GasUnit::Accumulated(2 + 2 + 3));
    }

    #[test]
    fn cost_saturates() {
        assert_eq!(GasUnit::StorageWrite(u64::MAX).cost(), u64::MAX);
    }
}
