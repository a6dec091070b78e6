pub mod expiry_heap;
pub mod linked_list;
pub mod singly_list;
pub mod slot_arena;

pub use expiry_heap::ExpiryHeap;
pub use linked_list::LinkedList;
pub use singly_list::SinglyList;
pub use slot_arena::{SlotArena, SlotId};
