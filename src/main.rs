fn main() {
    rustpadsynth::runtime::start();
}
