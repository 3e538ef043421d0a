//! Player objects published through the Object Transfer Service.
//!
//! The player exposes its icon, every track and group, the parent group and
//! the current track's segment list as OTS objects. All of them share one
//! content buffer and one busy slot: while an add is waiting for the OTS to
//! report the new id, selections and reads are refused with
//! [`ObjectError::Busy`].
//!
//! Content layouts:
//!
//! | Object        | Content                                                |
//! |---------------|--------------------------------------------------------|
//! | Icon          | `0, 1, 2, …` up to the icon bitmap size                |
//! | Track         | `0, 1, 2, …` up to the track object size               |
//! | Segments      | per segment: `name_len:u8, name, pos:le32`             |
//! | Group         | per track: `0x00, id:le48`                             |
//! | Parent group  | per sibling group: `0x01, id:le48`                     |
//!
//! Every layout is cut to [`MAX_OBJ_SIZE`] at a record boundary.

use heapless::Vec;
use library::{Catalog, GroupIdx, TrackIdx, MAX_GROUPS, MAX_TRACKS};
use platform::config::{ICON_BITMAP_SIZE, MAX_OBJ_SIZE, TRACK_OBJ_SIZE};
use platform::{ObjectAddParams, ObjectCreation, ObjectId, ObjectTransferService, ObjectType, OtsError};

use crate::engine::Mpl;
use crate::player::MediaPlayer;

/// Record type of a track entry in a group object.
pub const GROUP_RECORD_TRACK: u8 = 0x00;

/// Record type of a group entry in a group object.
pub const GROUP_RECORD_GROUP: u8 = 0x01;

const GROUP_RECORD_SIZE: usize = 1 + ObjectId::SIZE;

const ICON_NAME: &str = "Icon";

/// Icon, every track and group, the parent group and one segment list.
const PLAN_CAPACITY: usize = MAX_TRACKS + MAX_GROUPS + 3;

/// Object bookkeeping failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectError {
    /// An object add is still waiting for its id.
    #[error("object slot busy")]
    Busy,
    /// The id matches none of the player's current objects.
    #[error("unknown object")]
    UnknownObject,
    /// Read from an object other than the selected one.
    #[error("object not selected")]
    NotSelected,
    /// Read offset at or past the end of the content.
    #[error("offset out of range")]
    OffsetOutOfRange,
    /// The object transfer service refused an add.
    #[error("object add failed: {0}")]
    Ots(OtsError),
}

/// Progress of [`Mpl::register_objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Registration {
    /// Every object has been offered to the OTS.
    Complete,
    /// An add is waiting for [`Mpl::on_object_created`]; call
    /// [`Mpl::register_objects`] again once it has been delivered.
    Pending,
}

/// One object the player publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlannedObject {
    Icon,
    Track(TrackIdx),
    Group(GroupIdx),
    /// Parent of the sibling list containing the group.
    ParentGroup(GroupIdx),
    Segments(TrackIdx),
}

impl PlannedObject {
    fn object_type(self) -> ObjectType {
        match self {
            PlannedObject::Icon => ObjectType::Icon,
            PlannedObject::Track(_) => ObjectType::Track,
            PlannedObject::Group(_) | PlannedObject::ParentGroup(_) => ObjectType::Group,
            PlannedObject::Segments(_) => ObjectType::TrackSegments,
        }
    }

    fn name(self, catalog: &Catalog) -> &str {
        match self {
            PlannedObject::Icon => ICON_NAME,
            PlannedObject::Track(t) | PlannedObject::Segments(t) => catalog.track(t).title(),
            PlannedObject::Group(g) => catalog.group(g).title(),
            PlannedObject::ParentGroup(g) => catalog.group(catalog.group(g).parent()).title(),
        }
    }
}

/// The single object slot and the registration progress.
#[derive(Debug, Default)]
pub(crate) struct ObjectStore {
    selected: Option<ObjectId>,
    busy: bool,
    adding: Option<PlannedObject>,
    plan: Vec<PlannedObject, PLAN_CAPACITY>,
    cursor: usize,
    first_error: Option<OtsError>,
    content: Vec<u8, MAX_OBJ_SIZE>,
}

impl ObjectStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Mpl {
    /// Offer the player's objects to `ots`.
    ///
    /// Objects the OTS creates immediately get their id at once. When the OTS
    /// answers [`ObjectCreation::Pending`] this returns
    /// [`Registration::Pending`]; deliver the id through
    /// [`on_object_created`](Self::on_object_created) and call again to
    /// continue. A failed add is logged and skipped; the first such error is
    /// returned once every object has been offered.
    pub fn register_objects(
        &mut self,
        ots: &mut dyn ObjectTransferService,
    ) -> Result<Registration, ObjectError> {
        if self.objects.busy {
            warn!("object slot busy, registration deferred");
            return Err(ObjectError::Busy);
        }
        if self.objects.plan.is_empty() {
            self.plan_objects();
        }

        while let Some(&object) = self.objects.plan.get(self.objects.cursor) {
            self.objects.cursor = self.objects.cursor.saturating_add(1);
            fill_content(&self.catalog, object, &mut self.objects.content);

            let params = ObjectAddParams {
                name: object.name(&self.catalog),
                object_type: object.object_type(),
                size: u32::try_from(self.objects.content.len()).unwrap_or(u32::MAX),
                readable: true,
            };
            match ots.add(&params) {
                Ok(ObjectCreation::Created(id)) => self.assign_object_id(object, id),
                Ok(ObjectCreation::Pending) => {
                    self.objects.adding = Some(object);
                    self.objects.busy = true;
                    return Ok(Registration::Pending);
                }
                Err(e) => {
                    error!("unable to add {} object: {}", params.name, e);
                    self.objects.first_error.get_or_insert(e);
                }
            }
        }

        match self.objects.first_error.take() {
            Some(e) => Err(ObjectError::Ots(e)),
            None => {
                info!("{} objects registered", self.objects.plan.len());
                Ok(Registration::Complete)
            }
        }
    }

    /// The OTS created the object it reported as pending.
    pub fn on_object_created(
        &mut self,
        id: ObjectId,
        object_type: ObjectType,
    ) -> Result<(), ObjectError> {
        match self.objects.adding {
            Some(object) if object.object_type() == object_type => {
                self.assign_object_id(object, id);
                self.objects.adding = None;
                self.objects.busy = false;
                Ok(())
            }
            _ => {
                debug!("unexpected object created: {}", id);
                Err(ObjectError::UnknownObject)
            }
        }
    }

    /// A client selected object `id`: load its content into the buffer.
    pub fn on_object_selected(&mut self, id: ObjectId) -> Result<(), ObjectError> {
        if self.objects.busy {
            warn!("object slot busy, selection of {} refused", id);
            return Err(ObjectError::Busy);
        }
        let Some(object) = self.object_for_id(id) else {
            error!("selected object {} is unknown", id);
            return Err(ObjectError::UnknownObject);
        };
        fill_content(&self.catalog, object, &mut self.objects.content);
        self.objects.selected = Some(id);
        debug!("object {} selected, {} octets", id, self.objects.content.len());
        Ok(())
    }

    /// Read up to `len` content octets of the selected object from `offset`.
    pub fn on_object_read(
        &self,
        id: ObjectId,
        offset: usize,
        len: usize,
    ) -> Result<&[u8], ObjectError> {
        if self.objects.busy {
            return Err(ObjectError::Busy);
        }
        if self.objects.selected != Some(id) {
            return Err(ObjectError::NotSelected);
        }
        let content = self.objects.content.as_slice();
        let rest = content.get(offset..).filter(|r| !r.is_empty());
        let rest = rest.ok_or(ObjectError::OffsetOutOfRange)?;
        Ok(rest.get(..len.min(rest.len())).unwrap_or(rest))
    }

    /// A client deleted object `id`. The player keeps its own records.
    pub fn on_object_deleted(&self, id: ObjectId) {
        debug!("object {} deleted", id);
    }

    fn plan_objects(&mut self) {
        let catalog = &self.catalog;
        let plan = &mut self.objects.plan;
        let current = catalog.group(self.group).track();

        let mut planned = |object| {
            if plan.push(object).is_err() {
                warn!("object plan full");
            }
        };
        planned(PlannedObject::Icon);
        for g in catalog.siblings(self.group) {
            for t in catalog.tracks_of(g) {
                planned(PlannedObject::Track(t));
            }
            planned(PlannedObject::Group(g));
        }
        planned(PlannedObject::ParentGroup(self.group));
        planned(PlannedObject::Segments(current));
    }

    fn assign_object_id(&mut self, object: PlannedObject, id: ObjectId) {
        debug!("object {} assigned to {}", id, object.name(&self.catalog));
        match object {
            PlannedObject::Icon => self.icon_id = Some(id),
            PlannedObject::Track(t) => self.catalog.set_track_id(t, id),
            PlannedObject::Segments(t) => self.catalog.set_segments_id(t, id),
            PlannedObject::Group(g) => self.catalog.set_group_id(g, id),
            PlannedObject::ParentGroup(g) => {
                let parent = self.catalog.group(g).parent();
                self.catalog.set_group_id(parent, id);
            }
        }
    }

    /// Which current object `id` refers to, checked in a fixed order.
    fn object_for_id(&self, id: ObjectId) -> Option<PlannedObject> {
        let id = Some(id);
        let track = self.current_track();
        let explicit_next = self.next.map(|(_, t)| t);
        let natural_next = self.natural_next();

        if self.icon_id == id {
            return Some(PlannedObject::Icon);
        }
        if self.track().segments_id() == id {
            return Some(PlannedObject::Segments(track));
        }
        if self.track().id() == id {
            return Some(PlannedObject::Track(track));
        }
        for next in [explicit_next, natural_next].into_iter().flatten() {
            if self.catalog.track(next).id() == id {
                return Some(PlannedObject::Track(next));
            }
        }
        if self.parent_group_id() == id {
            return Some(PlannedObject::ParentGroup(self.group));
        }
        if self.current_group_id() == id {
            return Some(PlannedObject::Group(self.group));
        }
        None
    }
}

/// Load the content of `object` into `content`.
fn fill_content(catalog: &Catalog, object: PlannedObject, content: &mut Vec<u8, MAX_OBJ_SIZE>) {
    content.clear();
    match object {
        PlannedObject::Icon => counting_bytes(content, ICON_BITMAP_SIZE),
        PlannedObject::Track(_) => counting_bytes(content, TRACK_OBJ_SIZE),
        PlannedObject::Segments(t) => {
            for s in catalog.segments_of(t) {
                let segment = catalog.segment(s);
                let name = segment.name().as_bytes();
                let Ok(name_len) = u8::try_from(name.len()) else {
                    break;
                };
                let fits = content
                    .extend_from_slice(&[name_len])
                    .and_then(|()| content.extend_from_slice(name))
                    .and_then(|()| content.extend_from_slice(&segment.pos().to_le_bytes()));
                if fits.is_err() {
                    debug!("segments object out of space");
                    break;
                }
            }
        }
        PlannedObject::Group(g) => {
            let ids = catalog.tracks_of(g).map(|t| catalog.track(t).id());
            group_records(content, GROUP_RECORD_TRACK, ids);
        }
        PlannedObject::ParentGroup(g) => {
            let ids = catalog.siblings(g).map(|s| catalog.group(s).id());
            group_records(content, GROUP_RECORD_GROUP, ids);
        }
    }
}

/// `0, 1, 2, …` for `len` octets, capped at the buffer size. The counter
/// wraps at 256.
fn counting_bytes(content: &mut Vec<u8, MAX_OBJ_SIZE>, len: usize) {
    for k in (0..=u8::MAX).cycle().take(len.min(MAX_OBJ_SIZE)) {
        if content.push(k).is_err() {
            break;
        }
    }
}

/// Append whole `type, id:le48` records while they fit. An object without
/// an id yet is written as id 0.
fn group_records(
    content: &mut Vec<u8, MAX_OBJ_SIZE>,
    record_type: u8,
    ids: impl Iterator<Item = Option<ObjectId>>,
) {
    for id in ids {
        if content.len().saturating_add(GROUP_RECORD_SIZE) > MAX_OBJ_SIZE {
            warn!("not room for full group in object");
            break;
        }
        let bytes = id.map_or([0; ObjectId::SIZE], ObjectId::to_le_bytes);
        if content
            .extend_from_slice(&[record_type])
            .and_then(|()| content.extend_from_slice(&bytes))
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use platform::mocks::MockOts;
    use platform::CcidAllocator;

    /// Icon, 13 tracks, 4 groups, the parent group and one segment list.
    const OBJECT_COUNT: usize = 20;

    fn player() -> Mpl {
        Mpl::builtin(&mut CcidAllocator::new()).expect("builtin catalog")
    }

    fn registered() -> (Mpl, MockOts) {
        let mut mpl = player();
        let mut ots = MockOts::new();
        let done = mpl.register_objects(&mut ots).expect("registration");
        assert_eq!(done, Registration::Complete);
        (mpl, ots)
    }

    fn id(raw: u64) -> ObjectId {
        ObjectId::new(raw).expect("valid id")
    }

    #[test]
    fn test_registration_order_and_names() {
        let (mpl, ots) = registered();
        let added = ots.added();
        assert_eq!(added.len(), OBJECT_COUNT);
        assert_eq!(added[0].object_type, ObjectType::Icon);
        assert_eq!(added[0].name.as_str(), "Icon");
        assert_eq!(added[0].size, 127);
        assert_eq!(added[1].name.as_str(), "Interlude #1 (Song for Alison)");
        assert_eq!(added[1].size, 50);
        assert_eq!(added[6].object_type, ObjectType::Group);
        assert_eq!(added[6].name.as_str(), "Joe Pass - Guitar Interludes");
        assert_eq!(added[18].name.as_str(), "Parent group");
        assert_eq!(added[19].object_type, ObjectType::TrackSegments);
        assert_eq!(added[19].name.as_str(), "Interlude #1 (Song for Alison)");

        assert_eq!(mpl.icon_id(), Some(id(0x100)));
        assert_eq!(mpl.current_track_id(), Some(id(0x101)));
        assert_eq!(mpl.next_track_id(), Some(id(0x102)));
        assert_eq!(mpl.current_group_id(), Some(id(0x106)));
        assert_eq!(mpl.parent_group_id(), Some(id(0x112)));
        assert_eq!(mpl.track_segments_id(), Some(id(0x113)));
    }

    #[test]
    fn test_deferred_registration() {
        let mut mpl = player();
        let mut ots = MockOts::deferred();
        let mut rounds = 0;
        loop {
            match mpl.register_objects(&mut ots).expect("registration") {
                Registration::Complete => break,
                Registration::Pending => {
                    let added = ots.added().last().expect("an add");
                    mpl.on_object_created(added.id, added.object_type)
                        .expect("matches the pending add");
                    rounds += 1;
                }
            }
        }
        assert_eq!(rounds, OBJECT_COUNT);
        assert_eq!(mpl.current_group_id(), Some(id(0x106)));
    }

    #[test]
    fn test_pending_add_blocks_the_slot() {
        let mut mpl = player();
        let mut ots = MockOts::deferred();
        assert_eq!(mpl.register_objects(&mut ots), Ok(Registration::Pending));
        assert_eq!(mpl.register_objects(&mut ots), Err(ObjectError::Busy));
        assert_eq!(mpl.on_object_selected(id(0x100)), Err(ObjectError::Busy));
        assert_eq!(
            mpl.on_object_created(id(0x100), ObjectType::Track),
            Err(ObjectError::UnknownObject)
        );
    }

    #[test]
    fn test_failed_add_is_skipped_and_reported() {
        let mut mpl = player();
        let mut ots = MockOts::new().fail_at(1);
        let result = mpl.register_objects(&mut ots);
        assert_eq!(result, Err(ObjectError::Ots(OtsError::NoSpace)));
        assert_eq!(ots.added().len(), OBJECT_COUNT - 1);
        assert_eq!(mpl.current_track_id(), None);
        assert_eq!(mpl.icon_id(), Some(id(0x100)));
    }

    #[test]
    fn test_segments_object_content() {
        let (mut mpl, _) = registered();
        let segments = mpl.track_segments_id().expect("segments id");
        mpl.on_object_selected(segments).expect("select");
        let content = mpl.on_object_read(segments, 0, 200).expect("read");
        assert_eq!(content.len(), 29);
        assert_eq!(&content[..10], b"\x05Start\x00\x00\x00\x00");
        assert_eq!(&content[10..17], b"\x06Middle");
        assert_eq!(&content[17..21], &2000i32.to_le_bytes());
    }

    #[test]
    fn test_group_object_content() {
        let (mut mpl, _) = registered();
        let group = mpl.current_group_id().expect("group id");
        mpl.on_object_selected(group).expect("select");
        let content = mpl.on_object_read(group, 0, 127).expect("read");
        assert_eq!(content.len(), 5 * GROUP_RECORD_SIZE);
        assert_eq!(content[0], GROUP_RECORD_TRACK);
        assert_eq!(&content[1..7], &id(0x101).to_le_bytes());

        let parent = mpl.parent_group_id().expect("parent id");
        mpl.on_object_selected(parent).expect("select");
        let content = mpl.on_object_read(parent, 0, 127).expect("read");
        assert_eq!(content.len(), 4 * GROUP_RECORD_SIZE);
        assert_eq!(content[0], GROUP_RECORD_GROUP);
        assert_eq!(&content[1..7], &id(0x106).to_le_bytes());
    }

    #[test]
    fn test_read_bounds() {
        let (mut mpl, _) = registered();
        let icon = mpl.icon_id().expect("icon id");
        mpl.on_object_selected(icon).expect("select");
        let tail = mpl.on_object_read(icon, 120, 50).expect("read");
        assert_eq!(tail, [120, 121, 122, 123, 124, 125, 126]);
        assert_eq!(mpl.on_object_read(icon, 127, 1), Err(ObjectError::OffsetOutOfRange));
        assert_eq!(
            mpl.on_object_read(id(0x101), 0, 1),
            Err(ObjectError::NotSelected)
        );
    }

    #[test]
    fn test_selection_follows_current_track() {
        let (mut mpl, _) = registered();
        // Track 3 is neither current nor next.
        assert_eq!(mpl.on_object_selected(id(0x103)), Err(ObjectError::UnknownObject));

        mpl.set_current_track_id(id(0x103), &mut NullSink);
        mpl.on_object_selected(id(0x103)).expect("current track");
        assert_eq!(mpl.on_object_read(id(0x103), 0, 127).map(<[u8]>::len), Ok(50));
        mpl.on_object_selected(id(0x104)).expect("next track");
    }

    #[test]
    fn test_unknown_selection_keeps_previous() {
        let (mut mpl, _) = registered();
        let icon = mpl.icon_id().expect("icon id");
        mpl.on_object_selected(icon).expect("select");
        assert!(mpl.on_object_selected(id(0xFFFF)).is_err());
        assert!(mpl.on_object_read(icon, 0, 1).is_ok());
    }
}
