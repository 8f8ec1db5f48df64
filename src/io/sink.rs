//! Destination for generated notes

/// One generated note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// Output track
    pub track: u16,
    /// MIDI channel
    pub channel: u8,
    /// MIDI key
    pub pitch: u8,
    /// Absolute start time in beats
    pub start: f64,
    /// Length in beats
    pub duration: f64,
    /// Note-on velocity
    pub velocity: u8,
    /// Bar the note belongs to
    pub bar: usize,
    /// Seed row (drum voice) that produced the note
    pub voice: usize,
    /// Seed column (step within the bar) that produced the note
    pub step: usize,
}

/// Per-track information written before any note
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    /// Track name
    pub name: String,
    /// Tempo in beats per minute
    pub tempo_bpm: u32,
}

/// Receives the generated note stream
pub trait EventSink {
    /// Set the track name and tempo; called once before generation
    fn set_track_metadata(&mut self, metadata: &TrackMetadata);

    /// Accept one note
    fn add_note(&mut self, event: NoteEvent);
}

impl EventSink for Vec<NoteEvent> {
    fn set_track_metadata(&mut self, _metadata: &TrackMetadata) {}

    fn add_note(&mut self, event: NoteEvent) {
        self.push(event);
    }
}
