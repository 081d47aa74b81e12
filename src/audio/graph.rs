use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, SampleFormat, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::audio::devices::find_input_device;
use crate::audio::error::GraphError;
use crate::config::GraphConfig;
use crate::stages::{Gain, Stage, StageChain};

/// Analysis tap handed out once per build.
pub struct SpectrumTap {
    pub consumer: HeapCons<f32>,
    pub sample_rate: u32,
}

/// The one active signal graph:
/// input -> band-pass -> compressor -> delay -> spectrum tap -> gain -> output.
///
/// The input callback owns the stage chain outright; the tap and the
/// monitoring path are SPSC ring buffers, so nothing on the audio thread
/// takes a lock. Parameter and device changes go through a fresh
/// teardown-then-build, never through a live graph.
pub struct SignalGraph {
    input_stream: Option<Stream>,
    output_stream: Option<Stream>,
    tap: Option<SpectrumTap>,
    sample_rate: u32,
}

impl SignalGraph {
    /// Acquires the configured input device and starts the chain. The
    /// processed signal is also played back on the default output device
    /// when one is usable; analysis runs either way.
    pub fn build(host: &Host, config: &GraphConfig) -> Result<Self, GraphError> {
        let input_device = find_input_device(host, config.device_id.as_deref())?;
        let input_config = input_device
            .default_input_config()
            .map_err(GraphError::Config)?;

        if input_config.sample_format() != SampleFormat::F32 {
            return Err(GraphError::UnsupportedFormat(input_config.sample_format()));
        }

        let sample_rate = input_config.sample_rate().0;
        let channels = input_config.channels() as usize;

        // One second of headroom on each transport.
        let (tap_producer, tap_consumer) = HeapRb::<f32>::new(sample_rate as usize).split();
        let (monitor_producer, monitor_consumer) =
            HeapRb::<f32>::new(sample_rate as usize).split();

        let input_stream = build_input_stream(
            &input_device,
            sample_rate,
            channels,
            config,
            tap_producer,
            monitor_producer,
        )?;

        let output_stream = match build_monitor_stream(host, sample_rate, monitor_consumer) {
            Ok(stream) => stream,
            Err(e) => {
                eprintln!("Monitoring output unavailable: {}", e);
                None
            }
        };

        input_stream.play().map_err(GraphError::PlayStream)?;
        if let Some(stream) = &output_stream {
            stream.play().map_err(GraphError::PlayStream)?;
        }

        Ok(Self {
            input_stream: Some(input_stream),
            output_stream,
            tap: Some(SpectrumTap {
                consumer: tap_consumer,
                sample_rate,
            }),
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Hands the analysis tap to the caller. Yields once per build.
    pub fn take_tap(&mut self) -> Option<SpectrumTap> {
        self.tap.take()
    }

    /// Disconnects both streams. Safe to call on an already-torn-down
    /// graph; dropping the graph tears it down as well.
    pub fn teardown(&mut self) {
        self.input_stream = None;
        self.output_stream = None;
        self.tap = None;
    }

    pub fn is_active(&self) -> bool {
        self.input_stream.is_some()
    }
}

fn build_input_stream(
    device: &Device,
    sample_rate: u32,
    channels: usize,
    config: &GraphConfig,
    mut tap: HeapProd<f32>,
    mut monitor: HeapProd<f32>,
) -> Result<Stream, GraphError> {
    let stream_config = StreamConfig {
        channels: channels as u16,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let mut chain = StageChain::new(config, sample_rate);
    let mut gain = Gain::new(config.gain_level);
    let mut mono: Vec<f32> = Vec::new();

    device
        .build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                mono.clear();
                mono.extend(
                    data.chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32),
                );

                chain.process(&mut mono);

                // Tap sits between the delay and the output gain. When a
                // transport is full the newest samples are dropped.
                tap.push_slice(&mono);
                gain.process(&mut mono);
                monitor.push_slice(&mono);
            },
            |err| eprintln!("Input stream error: {}", err),
            None,
        )
        .map_err(GraphError::BuildStream)
}

fn build_monitor_stream(
    host: &Host,
    sample_rate: u32,
    mut monitor: HeapCons<f32>,
) -> Result<Option<Stream>, GraphError> {
    let Some(device) = host.default_output_device() else {
        return Ok(None);
    };

    let output_config = device
        .default_output_config()
        .map_err(GraphError::Config)?;
    if output_config.sample_format() != SampleFormat::F32 {
        return Err(GraphError::UnsupportedFormat(output_config.sample_format()));
    }

    let channels = output_config.channels() as usize;
    let stream_config = StreamConfig {
        channels: channels as u16,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let sample = monitor.try_pop().unwrap_or(0.0);
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| eprintln!("Output stream error: {}", err),
            None,
        )
        .map(Some)
        .map_err(GraphError::BuildStream)
}
