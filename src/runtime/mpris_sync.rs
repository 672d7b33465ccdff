use crate::host::PlaybackState;
use crate::mpris::MprisHandle;
use crate::phone::Phone;

/// What MPRIS last saw, to publish only changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    track: Option<(usize, String)>,
    playback: PlaybackState,
}

impl MprisSnapshot {
    pub fn of(phone: &Phone) -> Self {
        phone
            .now_playing()
            .map(|now| Self {
                track: Some((now.index, now.track.key)),
                playback: now.state,
            })
            .unwrap_or_default()
    }
}

pub fn update_mpris(mpris: &MprisHandle, phone: &Phone) {
    let now = phone.now_playing();
    mpris.set_track_metadata(now.as_ref());
    mpris.set_playback(now.map_or(PlaybackState::Stopped, |n| n.state));
}
