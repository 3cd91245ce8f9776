mod counter;
mod crossing;
mod line_side;
mod matching;
mod rect;
mod rotation;
mod track;
mod track_manager;

pub use counter::{Counter, Counts, ZoneKind};
pub use crossing::CountingLine;
pub use line_side::LineSide;
pub use matching::{AssignmentResult, euclidean_distance, first_fit_assignment};
pub use rect::Rect;
pub use rotation::{rotate, to_pixel};
pub use track::{Point, Track};
pub use track_manager::{FrameUpdate, MAX_TRACK_FRAMES, TrackManager, ZoneConfig};
