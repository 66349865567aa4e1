use anyhow::Context;
use fundsp::hacker32::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Bomb,
    Slice,
    Round,
}

impl Effect {
    /// Mono samples at 44.1kHz.
    pub fn render(self) -> Vec<f32> {
        match self {
            Effect::Bomb => {
                // Noise burst over a falling rumble.
                let rumble = lfo(|t: f32| 120.0 - 80.0 * (t / 0.6).min(1.0)) >> sine();
                let mut unit = (noise() * 0.7 + rumble * 0.5) * lfo(|t: f32| 0.4 * (-t * 5.0).exp());
                collect(700, || unit.get_mono() as f32)
            }
            Effect::Slice => {
                // Quick downward swish.
                let freq = lfo(|t: f32| 900.0 - 600.0 * (t / 0.12).min(1.0));
                let gain = lfo(|t: f32| 0.12 * (1.0 - t / 0.12).max(0.0));
                let mut unit = (freq >> saw()) * gain;
                collect(120, || unit.get_mono() as f32)
            }
            Effect::Round => {
                let freq = lfo(|t: f32| if t < 0.1 { 660.0 } else { 880.0 });
                let gain = lfo(|t: f32| 0.15 * (1.0 - t / 0.25).max(0.0));
                let mut unit = (freq >> sine()) * gain;
                collect(250, || unit.get_mono() as f32)
            }
        }
    }
}

fn collect(millis: u32, mut next: impl FnMut() -> f32) -> Vec<f32> {
    let n = (SAMPLE_RATE * millis / 1000) as usize;
    (0..n).map(|_| next().clamp(-1.0, 1.0)).collect()
}

// ── Output ──────────────────────────────────────────────────────────────────

/// The default audio output. Dropping it silences everything still playing.
pub struct Sound {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Sound {
    pub fn open() -> anyhow::Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Starts `effect` in the background.
    pub fn play(&self, effect: Effect) -> anyhow::Result<()> {
        let sink = Sink::try_new(&self.handle).context("could not open an audio sink")?;
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, effect.render()));
        sink.detach(); // Play in background
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_have_their_length() {
        assert_eq!(Effect::Bomb.render().len(), 30_870);
        assert_eq!(Effect::Slice.render().len(), 5_292);
        assert_eq!(Effect::Round.render().len(), 11_025);
    }

    #[test]
    fn samples_stay_in_range() {
        for effect in [Effect::Bomb, Effect::Slice, Effect::Round] {
            let samples = effect.render();
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
            assert!(samples.iter().any(|s| *s != 0.0), "{effect:?} is silent");
        }
    }
}
