//! Standard MIDI File output for generated note streams
//!
//! Notes are collected in memory and rendered as a single-track SMF with a
//! track name and tempo at tick zero. Times in beats map to ticks at
//! [`TICKS_PER_BEAT`] per quarter note.

use crate::io::configuration::{
    DEFAULT_TEMPO_BPM, DEFAULT_TRACK_NAME, MAX_MIDI_CHANNEL, MAX_MIDI_VALUE, MIN_TEMPO_BPM,
    TICKS_PER_BEAT,
};
use crate::io::error::{Result, VariationError};
use crate::io::sink::{EventSink, NoteEvent, TrackMetadata};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

const MICROSECONDS_PER_MINUTE: u32 = 60_000_000;
const MAX_U24: u32 = 0x00FF_FFFF;
const MAX_U28: u32 = 0x0FFF_FFFF;

/// Note boundary placed on the tick timeline
#[derive(Debug, Clone, Copy)]
struct TimedMessage {
    tick: u32,
    /// Note-offs sort before note-ons on the same tick
    is_on: bool,
    channel: u8,
    key: u8,
    velocity: u8,
}

/// Event sink that renders to a Standard MIDI File
#[derive(Debug, Clone, Default)]
pub struct MidiSink {
    metadata: Option<TrackMetadata>,
    notes: Vec<NoteEvent>,
}

impl MidiSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes received so far, in arrival order
    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    /// Track metadata, if set
    pub const fn metadata(&self) -> Option<&TrackMetadata> {
        self.metadata.as_ref()
    }

    /// Render the collected notes as an in-memory SMF borrowing the track name
    pub fn to_smf(&self) -> Smf<'_> {
        let (name, tempo_bpm) = self.metadata.as_ref().map_or(
            (DEFAULT_TRACK_NAME, DEFAULT_TEMPO_BPM),
            |metadata| (metadata.name.as_str(), metadata.tempo_bpm),
        );

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(TICKS_PER_BEAT)),
        ));

        let mut track: Track<'_> = Vec::with_capacity(self.notes.len() * 2 + 3);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
        });
        let tempo = MICROSECONDS_PER_MINUTE / tempo_bpm.max(MIN_TEMPO_BPM);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo.min(MAX_U24)))),
        });

        let mut last_tick = 0;
        for message in self.timeline() {
            let delta = message.tick.saturating_sub(last_tick);
            last_tick = message.tick;

            let key = u7::new(message.key.min(MAX_MIDI_VALUE));
            let midi_message = if message.is_on {
                MidiMessage::NoteOn {
                    key,
                    vel: u7::new(message.velocity.min(MAX_MIDI_VALUE)),
                }
            } else {
                MidiMessage::NoteOff {
                    key,
                    vel: u7::new(0),
                }
            };

            track.push(TrackEvent {
                delta: u28::new(delta.min(MAX_U28)),
                kind: TrackEventKind::Midi {
                    channel: u4::new(message.channel.min(MAX_MIDI_CHANNEL)),
                    message: midi_message,
                },
            });
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);

        smf
    }

    /// Encode the SMF to bytes
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_smf().write_std(&mut buf)?;
        Ok(buf)
    }

    /// Encode the SMF and write it to `path`
    ///
    /// # Errors
    ///
    /// Returns [`VariationError::MidiExport`] if encoding or writing fails.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let export_error = |source: std::io::Error| VariationError::MidiExport {
            path: path.to_path_buf(),
            source,
        };

        let mut buf = Vec::new();
        self.to_smf().write_std(&mut buf).map_err(export_error)?;
        std::fs::write(path, &buf).map_err(export_error)
    }

    /// Note-on and note-off messages sorted by tick
    fn timeline(&self) -> Vec<TimedMessage> {
        let mut messages = Vec::with_capacity(self.notes.len() * 2);
        for note in &self.notes {
            let on = beats_to_ticks(note.start);
            let off = beats_to_ticks(note.start + note.duration).max(on);
            messages.push(TimedMessage {
                tick: on,
                is_on: true,
                channel: note.channel,
                key: note.pitch,
                velocity: note.velocity,
            });
            messages.push(TimedMessage {
                tick: off,
                is_on: false,
                channel: note.channel,
                key: note.pitch,
                velocity: 0,
            });
        }
        messages.sort_by_key(|m| (m.tick, m.is_on, m.channel, m.key));
        messages
    }
}

impl EventSink for MidiSink {
    fn set_track_metadata(&mut self, metadata: &TrackMetadata) {
        self.metadata = Some(metadata.clone());
    }

    fn add_note(&mut self, event: NoteEvent) {
        self.notes.push(event);
    }
}

/// Convert a time in beats to the nearest tick, clamping negatives to zero
pub fn beats_to_ticks(beats: f64) -> u32 {
    (beats * f64::from(TICKS_PER_BEAT)).round().max(0.0) as u32
}
