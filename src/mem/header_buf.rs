use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::slice;

use super::{DeinitStrategy, resolve_chunks};
use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// The fixed header at the start of the allocation. The caller's payload rides along with the
/// buffer's own bookkeeping.
struct RawHeader<H> {
    count: usize,
    capacity: usize,
    min_capacity: usize,
    strategy: DeinitStrategy,
    payload: H,
    // Tracks which slots hold live values, so drop can verify the strategy against reality.
    #[cfg(debug_assertions)]
    init_map: Vec<bool>,
}

/// A single heap allocation holding a fixed header followed by a run of element slots.
///
/// The header carries a caller payload `H` alongside the buffer's own bookkeeping (capacity,
/// live count, [`DeinitStrategy`]); the element slots follow in the same allocation, so a
/// header-plus-elements structure costs one allocation rather than two.
///
/// Creation takes a **minimum** capacity: the allocation's byte size is rounded up to a size
/// class, and the slack becomes extra slots, so `capacity() >= min_capacity()` and callers must
/// not assume exact sizing. Slots start uninitialized; [`push`](HeaderBuf::push) and
/// [`write`](HeaderBuf::write) initialize them. On drop, the strategy names which slots to
/// destroy: regions are bounds-checked first (an out-of-range strategy panics rather than touch
/// memory outside the allocation), and under `debug_assertions` an initialization map asserts
/// that every destroyed slot was initialized exactly once. When the buffer is dropped while
/// another panic is unwinding, uninitialized slots are skipped rather than asserted on.
///
/// There is no separate free operation; the allocation lives exactly as long as the `HeaderBuf`.
pub struct HeaderBuf<H, T> {
    ptr: NonNull<RawHeader<H>>,
    // Byte offset of the first element slot within the allocation.
    offset: usize,
    _phantom: PhantomData<T>,
}

impl<H, T> HeaderBuf<H, T> {
    /// Allocates a buffer with at least `min_capacity` element slots, all uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    pub fn new(payload: H, min_capacity: usize, strategy: DeinitStrategy) -> HeaderBuf<H, T> {
        let capacity = Self::slacked_capacity(min_capacity);
        let (layout, offset) = Self::make_layout(capacity);

        // SAFETY: RawHeader contains usize fields, so the layout is never zero-sized.
        let raw_ptr: *mut RawHeader<H> = unsafe { alloc::alloc(layout).cast() };
        let ptr = NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout));

        // SAFETY: The pointer was just allocated for a layout beginning with RawHeader<H>.
        unsafe {
            ptr.write(RawHeader {
                count: 0,
                capacity,
                min_capacity,
                strategy,
                payload,
                #[cfg(debug_assertions)]
                init_map: vec![false; capacity],
            });
        }

        HeaderBuf {
            ptr,
            offset,
            _phantom: PhantomData,
        }
    }

    /// The layout of the whole allocation for `capacity` slots, and the byte offset of the first
    /// slot.
    ///
    /// # Panics
    /// Panics if the layout size exceeds [`isize::MAX`].
    fn make_layout(capacity: usize) -> (Layout, usize) {
        let header = Layout::new::<RawHeader<H>>();
        let elements = Layout::array::<T>(capacity).expect("Capacity overflow!");
        let (layout, offset) = header.extend(elements).expect("Capacity overflow!");
        (layout.pad_to_align(), offset)
    }

    /// The actual slot count for a requested minimum: the total byte size is rounded up to the
    /// next power of two (at least 64 bytes) and the slack becomes extra slots.
    fn slacked_capacity(min_capacity: usize) -> usize {
        if size_of::<T>() == 0 {
            return min_capacity;
        }
        let (base, offset) = Self::make_layout(min_capacity);
        let total = base.size().checked_next_power_of_two().unwrap_or(base.size()).max(64);
        (total - offset) / size_of::<T>()
    }

    fn raw(&self) -> &RawHeader<H> {
        // SAFETY: ptr was allocated and initialized in new and lives until drop.
        unsafe { self.ptr.as_ref() }
    }

    fn raw_mut(&mut self) -> &mut RawHeader<H> {
        // SAFETY: ptr was allocated and initialized in new and lives until drop; &mut self
        // guarantees exclusivity.
        unsafe { self.ptr.as_mut() }
    }

    /// A pointer to the slot at `index`. The slot may be uninitialized.
    fn slot(&self, index: usize) -> *mut T {
        // SAFETY: make_layout reserved offset + capacity * size_of::<T>() bytes, and every
        // caller checks index against the capacity.
        unsafe { self.ptr.as_ptr().cast::<u8>().add(self.offset).cast::<T>().add(index) }
    }

    #[cfg(debug_assertions)]
    fn mark_initialized(&mut self, index: usize) {
        let map = &mut self.raw_mut().init_map;
        assert!(!map[index], "Slot {index} initialized twice!");
        map[index] = true;
    }

    #[cfg(not(debug_assertions))]
    fn mark_initialized(&mut self, _index: usize) {}

    /// The caller's header payload.
    pub fn header(&self) -> &H {
        &self.raw().payload
    }

    pub fn header_mut(&mut self) -> &mut H {
        &mut self.raw_mut().payload
    }

    /// The number of live elements in the counted region.
    pub fn count(&self) -> usize {
        self.raw().count
    }

    /// The actual number of slots, including slack. Never less than
    /// [`min_capacity`](HeaderBuf::min_capacity).
    pub fn capacity(&self) -> usize {
        self.raw().capacity
    }

    /// The slot count requested at construction.
    pub fn min_capacity(&self) -> usize {
        self.raw().min_capacity
    }

    pub fn strategy(&self) -> &DeinitStrategy {
        &self.raw().strategy
    }

    /// The first slot of the region governed by `count`.
    fn counted_base(&self) -> usize {
        match self.raw().strategy {
            DeinitStrategy::Count { from_offset } => from_offset,
            _ => 0,
        }
    }

    /// Initializes the next slot of the counted region and bumps the count.
    ///
    /// # Panics
    /// Panics if the counted region has reached the capacity.
    pub fn push(&mut self, value: T) {
        let index = self.counted_base() + self.count();
        if index >= self.capacity() {
            Err::<(), _>(CapacityOverflow).throw();
        }
        // SAFETY: index was checked against the capacity, so the slot is within the allocation.
        unsafe {
            self.slot(index).write(value);
        }
        self.mark_initialized(index);
        self.raw_mut().count += 1;
    }

    /// Initializes the slot at an absolute `index`. Intended for regions the strategy destroys
    /// which are not governed by `count` ([`MinimumCapacity`](DeinitStrategy::MinimumCapacity),
    /// [`FullCapacity`](DeinitStrategy::FullCapacity), [`Chunks`](DeinitStrategy::Chunks)).
    ///
    /// # Panics
    /// Panics if `index` is beyond the capacity, or (under `debug_assertions`) if the slot is
    /// already initialized.
    pub fn write(&mut self, index: usize, value: T) {
        if index >= self.capacity() {
            Err::<(), _>(IndexOutOfBounds {
                index,
                len: self.capacity(),
            })
            .throw();
        }
        // SAFETY: index was checked against the capacity, so the slot is within the allocation.
        unsafe {
            self.slot(index).write(value);
        }
        self.mark_initialized(index);
    }

    /// The element at `index` within the counted region.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count() {
            return None;
        }
        // SAFETY: Slots [counted_base, counted_base + count) are initialized: push is the only
        // safe way to grow count and it writes each slot in turn.
        unsafe { Some(&*self.slot(self.counted_base() + index)) }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.count() {
            return None;
        }
        // SAFETY: As for get; &mut self guarantees exclusivity.
        unsafe { Some(&mut *self.slot(self.counted_base() + index)) }
    }

    /// The counted region as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots [counted_base, counted_base + count) are initialized and contiguous.
        unsafe { slice::from_raw_parts(self.slot(self.counted_base()), self.count()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice; &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.slot(self.counted_base()), self.count()) }
    }

    /// Overwrites the live count without touching any slots.
    ///
    /// # Safety
    /// Every slot of the counted region implied by the new count must be initialized, and slots
    /// leaving the region must have been moved out or be safe to leak.
    pub unsafe fn set_count(&mut self, count: usize) {
        #[cfg(debug_assertions)]
        {
            let base = self.counted_base();
            let old = self.count();
            for index in old.min(count)..old.max(count) {
                self.raw_mut().init_map[base + index] = index < count;
            }
        }
        self.raw_mut().count = count;
    }

    /// A raw pointer to the first element slot.
    ///
    /// # Safety
    /// The pointer is valid for `capacity()` slots while the buffer is alive. The caller is
    /// responsible for only reading slots that are initialized, and for keeping the strategy's
    /// view of initialization true: slots initialized through this pointer must be reported with
    /// [`set_count`](HeaderBuf::set_count) or [`set_initialized`](HeaderBuf::set_initialized),
    /// or the drop-time validation will disagree with reality.
    pub unsafe fn elements_ptr(&mut self) -> NonNull<T> {
        // SAFETY: slot(0) points into the live allocation and is never null.
        unsafe { NonNull::new_unchecked(self.slot(0)) }
    }

    /// Records that the slot at `index` was initialized through
    /// [`elements_ptr`](HeaderBuf::elements_ptr). A no-op without `debug_assertions`.
    ///
    /// # Safety
    /// The slot must actually hold a live value.
    pub unsafe fn set_initialized(&mut self, index: usize) {
        self.mark_initialized(index);
    }

    /// The regions the strategy will destroy, as absolute `(start, len)` slot ranges.
    fn deinit_regions(&self) -> Vec<(usize, usize)> {
        match &self.raw().strategy {
            DeinitStrategy::Count { from_offset } => vec![(*from_offset, self.count())],
            DeinitStrategy::MinimumCapacity => vec![(0, self.min_capacity())],
            DeinitStrategy::FullCapacity => vec![(0, self.capacity())],
            DeinitStrategy::Chunks(chunks) => resolve_chunks(chunks),
        }
    }
}

impl<H, T> Drop for HeaderBuf<H, T> {
    fn drop(&mut self) {
        let capacity = self.capacity();
        let regions = self.deinit_regions();

        // Validate every region before destroying anything, so a bad strategy panics without
        // touching memory outside the allocation.
        for (start, len) in &regions {
            assert!(
                start.checked_add(*len).is_some_and(|end| end <= capacity),
                "Deinit region {start}..{} is out of range for capacity {capacity}!",
                start.wrapping_add(*len)
            );
        }

        for (start, len) in regions {
            for index in start..start + len {
                #[cfg(debug_assertions)]
                {
                    let map = &mut self.raw_mut().init_map;
                    // Asserting while another panic is unwinding would abort, so slots the map
                    // says are dead are skipped instead.
                    if std::thread::panicking() {
                        if !map[index] {
                            continue;
                        }
                    } else {
                        assert!(map[index], "Slot {index} destroyed without being initialized!");
                    }
                    map[index] = false;
                }
                // SAFETY: The region was bounds-checked, and the strategy's contract is that
                // these slots are initialized.
                unsafe {
                    ptr::drop_in_place(self.slot(index));
                }
            }
        }

        let (layout, _) = Self::make_layout(capacity);
        // SAFETY: ptr was allocated in new with this same layout; the header is initialized and
        // dropped exactly once, here.
        unsafe {
            ptr::drop_in_place(self.ptr.as_ptr());
            alloc::dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

impl<H: Debug, T: Debug> Debug for HeaderBuf<H, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderBuf")
            .field("header", self.header())
            .field("contents", &self.as_slice())
            .field("count", &self.count())
            .field("capacity", &self.capacity())
            .field("strategy", self.strategy())
            .finish()
    }
}
