//! Audio playback queue keyed by sound effect
//!
//! Each effect owns a playback channel so overlapping effects do not cut each
//! other off. The manager only decides what to play and how loud; the
//! platform layer drains the requests and feeds them to its mixer.
//!
//! Sound effects keep only the latest request per channel. Background music
//! keeps every transport change in order, since the mixer has to see a start
//! before a pause.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Folder holding the sound clips
pub const SOUND_FOLDER: &str = "sounds/";

/// Number of playback channels (one per effect)
pub const CHANNEL_COUNT: usize = 4;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Looping background music
    Background,
    /// Grain landed in the rescue container
    AddSugar,
    /// Rescue container detonated
    Explosion,
    /// Level finished
    LevelComplete,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; CHANNEL_COUNT] = [
        SoundEffect::Background,
        SoundEffect::AddSugar,
        SoundEffect::Explosion,
        SoundEffect::LevelComplete,
    ];

    /// Event name used by level scripts and settings
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Background => "background",
            SoundEffect::AddSugar => "add_sugar",
            SoundEffect::Explosion => "explosion",
            SoundEffect::LevelComplete => "lvl_complete",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }

    pub fn file(&self) -> &'static str {
        match self {
            SoundEffect::Background => "background.mp3",
            SoundEffect::AddSugar => "sugar_drop.mp3",
            SoundEffect::Explosion => "explosion.mp3",
            SoundEffect::LevelComplete => "complete_lvl.mp3",
        }
    }

    /// Clip path relative to the asset root
    pub fn path(&self) -> String {
        format!("{}{}", SOUND_FOLDER, self.file())
    }

    pub fn channel(&self) -> usize {
        match self {
            SoundEffect::Background => 0,
            SoundEffect::AddSugar => 1,
            SoundEffect::Explosion => 2,
            SoundEffect::LevelComplete => 3,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Background)
    }
}

/// What the mixer should do with a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Start the clip from the beginning
    Play,
    Pause,
    Resume,
    /// Change the volume of whatever the channel is playing
    SetVolume,
}

/// A fire-and-forget playback order for the mixer
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub action: PlaybackAction,
    pub effect: SoundEffect,
    pub channel: usize,
    pub clip: String,
    pub volume: f32,
    pub looping: bool,
}

/// Background music state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: MusicState,
    /// Latest pending sound effect request per channel
    pending: [Option<PlaybackRequest>; CHANNEL_COUNT],
    /// Background music transport changes, oldest first
    music_requests: Vec<PlaybackRequest>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.8,
            muted: false,
            music: MusicState::Stopped,
            pending: Default::default(),
            music_requests: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.sync_music_volume();
        }
    }

    /// Get effective volume for an effect
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else if effect.is_music() {
            self.master_volume * self.music_volume
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn request(&self, effect: SoundEffect, action: PlaybackAction) -> PlaybackRequest {
        PlaybackRequest {
            action,
            effect,
            channel: effect.channel(),
            clip: effect.path(),
            volume: self.effective_volume(effect),
            looping: effect.is_music(),
        }
    }

    fn queue_music(&mut self, action: PlaybackAction) {
        let request = self.request(SoundEffect::Background, action);
        log::debug!("Music {:?} at {:.2}", action, request.volume);
        self.music_requests.push(request);
    }

    /// Tell the mixer the new music volume if the loop is loaded
    fn sync_music_volume(&mut self) {
        if self.music != MusicState::Stopped {
            self.queue_music(PlaybackAction::SetVolume);
        }
    }

    /// Play a sound effect on its own channel
    ///
    /// Replaces only a request still pending on the same channel. Silent
    /// effects are skipped; background music always starts so it can be
    /// unmuted later.
    pub fn play(&mut self, effect: SoundEffect) {
        if effect.is_music() {
            self.start_background();
            return;
        }
        if self.effective_volume(effect) <= 0.0 {
            return;
        }

        let channel = effect.channel();
        self.pending[channel] = Some(self.request(effect, PlaybackAction::Play));
        log::debug!("Queued {} on channel {}", effect.name(), channel);
    }

    /// Play by event name; unknown names are ignored
    pub fn play_named(&mut self, name: &str) -> bool {
        match SoundEffect::from_name(name) {
            Some(effect) => {
                self.play(effect);
                true
            }
            None => {
                log::warn!("Unknown sound '{}'", name);
                false
            }
        }
    }

    /// Map a simulation event to its sound
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SugarCollected { .. } => self.play(SoundEffect::AddSugar),
            GameEvent::RescueDetonated { .. } => self.play(SoundEffect::Explosion),
            _ => {}
        }
    }

    // === Background music ===

    /// Start the looping background track, even while muted
    pub fn start_background(&mut self) {
        self.music = MusicState::Playing;
        self.queue_music(PlaybackAction::Play);
    }

    pub fn pause_background(&mut self) {
        if self.music == MusicState::Playing {
            self.music = MusicState::Paused;
            self.queue_music(PlaybackAction::Pause);
        }
    }

    pub fn resume_background(&mut self) {
        if self.music == MusicState::Paused {
            self.music = MusicState::Playing;
            self.queue_music(PlaybackAction::Resume);
        }
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    /// Take all pending requests: music changes in order, then effects by channel
    pub fn drain_requests(&mut self) -> Vec<PlaybackRequest> {
        let mut requests = std::mem::take(&mut self.music_requests);
        requests.extend(self.pending.iter_mut().filter_map(Option::take));
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_channels() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("boing"), None);
        assert_eq!(SoundEffect::Explosion.path(), "sounds/explosion.mp3");
        let channels: HashSet<_> = SoundEffect::ALL.iter().map(|e| e.channel()).collect();
        assert_eq!(channels.len(), CHANNEL_COUNT);
    }

    #[test]
    fn test_overlapping_effects_use_separate_channels() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::AddSugar);
        audio.play(SoundEffect::Explosion);
        audio.play(SoundEffect::AddSugar);

        let requests = audio.drain_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].effect, SoundEffect::AddSugar);
        assert_eq!(requests[1].channel, 2);
        assert!(audio.drain_requests().is_empty());
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Explosion);
        assert!((audio.drain_requests()[0].volume - 0.5).abs() < 1e-6);

        audio.set_muted(true);
        audio.play(SoundEffect::Explosion);
        assert!(audio.drain_requests().is_empty());
    }

    #[test]
    fn test_background_loop_state() {
        let mut audio = AudioManager::new();
        audio.resume_background();
        assert_eq!(audio.music_state(), MusicState::Stopped);

        audio.start_background();
        let request = &audio.drain_requests()[0];
        assert!(request.looping);
        assert_eq!(request.channel, 0);
        assert_eq!(request.action, PlaybackAction::Play);

        audio.pause_background();
        audio.pause_background();
        assert_eq!(audio.music_state(), MusicState::Paused);
        audio.resume_background();
        assert_eq!(audio.music_state(), MusicState::Playing);

        let actions: Vec<_> = audio
            .drain_requests()
            .into_iter()
            .map(|r| (r.channel, r.action))
            .collect();
        assert_eq!(
            actions,
            vec![(0, PlaybackAction::Pause), (0, PlaybackAction::Resume)]
        );
    }

    #[test]
    fn test_muted_start_recovers_on_unmute() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.start_background();
        let started = audio.drain_requests();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].action, PlaybackAction::Play);
        assert_eq!(started[0].volume, 0.0);

        audio.set_muted(false);
        audio.resume_background();
        let requests = audio.drain_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].channel, 0);
        assert_eq!(requests[0].action, PlaybackAction::SetVolume);
        assert!(requests[0].volume > 0.0);
    }

    #[test]
    fn test_start_then_pause_keeps_both_in_order() {
        let mut audio = AudioManager::new();
        audio.start_background();
        audio.pause_background();
        audio.play(SoundEffect::AddSugar);

        let actions: Vec<_> = audio
            .drain_requests()
            .into_iter()
            .map(|r| (r.effect, r.action))
            .collect();
        assert_eq!(
            actions,
            vec![
                (SoundEffect::Background, PlaybackAction::Play),
                (SoundEffect::Background, PlaybackAction::Pause),
                (SoundEffect::AddSugar, PlaybackAction::Play),
            ]
        );
    }

    #[test]
    fn test_volume_change_reaches_loaded_music_only() {
        let mut audio = AudioManager::new();
        audio.set_music_volume(0.5);
        assert!(audio.drain_requests().is_empty());

        audio.start_background();
        audio.drain_requests();
        audio.set_music_volume(0.25);
        let requests = audio.drain_requests();
        assert_eq!(requests[0].action, PlaybackAction::SetVolume);
        assert!((requests[0].volume - 0.8 * 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_events_map_to_sounds() {
        let mut audio = AudioManager::from_settings(&Settings::default());
        audio.handle_event(&GameEvent::RescueDetonated {
            center: Vec2::ZERO,
            pushed: 3,
        });
        audio.handle_event(&GameEvent::RescueEmptied { count: 1 });
        assert!(!audio.play_named("nope"));
        assert!(audio.play_named("lvl_complete"));

        let effects: Vec<_> = audio
            .drain_requests()
            .into_iter()
            .map(|r| r.effect)
            .collect();
        assert_eq!(
            effects,
            vec![SoundEffect::Explosion, SoundEffect::LevelComplete]
        );
    }
}
