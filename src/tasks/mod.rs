// NoiseNode — Tasks
//
// One module per FreeRTOS task. `audio` (producer) and `sender` (consumer)
// form the queue pipeline; `light` and `climate` are independent periodic
// loops; `monitor` is diagnostics only.

pub mod audio;
pub mod climate;
pub mod light;
pub mod monitor;
pub mod sender;
