//! Butcher tableaus for embedded explicit Runge-Kutta pairs.

pub(crate) const MAX_STAGES: usize = 12;

/// Stage weights of the local error estimate.
pub(crate) enum ErrorWeights {
    /// Embedded lower-order solution `b_hat`; the error is the difference
    /// between the two solutions.
    Embedded([f64; MAX_STAGES]),
    /// Fifth- and third-order error weights blended into one estimate. The
    /// third-order term damps the fifth-order one on large steps.
    Blended {
        fifth: [f64; MAX_STAGES],
        third: [f64; MAX_STAGES],
    },
}

/// An explicit Runge-Kutta scheme: `b` advances the solution and `error`
/// estimates the local error of each step.
pub(crate) struct Tableau {
    pub name: &'static str,
    pub stages: usize,
    pub c: [f64; MAX_STAGES],
    pub a: [[f64; MAX_STAGES]; MAX_STAGES],
    pub b: [f64; MAX_STAGES],
    pub error: ErrorWeights,
    /// Exponent applied to the error norm when resizing the step, `1/(q+1)`
    /// for the order `q` the estimate controls.
    pub error_exponent: f64,
}

/// Result of one trial step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step<const N: usize> {
    pub y: [f64; N],
    pub error: [f64; N],
    /// Third-order error estimate, present for blended schemes.
    pub coarse: Option<[f64; N]>,
}

impl Tableau {
    /// Take one step of size `h` from `(t, y)`.
    pub fn step<const N: usize>(
        &self,
        f: &dyn Fn(f64, &[f64; N]) -> [f64; N],
        t: f64,
        y: &[f64; N],
        h: f64,
    ) -> Step<N> {
        let mut k = [[0.0; N]; MAX_STAGES];
        for stage in 0..self.stages {
            let mut y_stage = *y;
            for (j, k_j) in k.iter().enumerate().take(stage) {
                let a = self.a[stage][j];
                if a != 0.0 {
                    for (yi, ki) in y_stage.iter_mut().zip(k_j) {
                        *yi += h * a * ki;
                    }
                }
            }
            k[stage] = f(t + self.c[stage] * h, &y_stage);
        }

        let (error_weights, coarse_weights): ([f64; MAX_STAGES], Option<&[f64; MAX_STAGES]>) =
            match &self.error {
                ErrorWeights::Embedded(b_hat) => {
                    (std::array::from_fn(|i| self.b[i] - b_hat[i]), None)
                }
                ErrorWeights::Blended { fifth, third } => (*fifth, Some(third)),
            };

        let mut y_next = *y;
        let mut error = [0.0; N];
        let mut coarse = coarse_weights.map(|_| [0.0; N]);
        for (stage, k_s) in k.iter().enumerate().take(self.stages) {
            let b = self.b[stage];
            let e = error_weights[stage];
            for i in 0..N {
                y_next[i] += h * b * k_s[i];
                error[i] += h * e * k_s[i];
            }
            if let (Some(weights), Some(coarse)) = (coarse_weights, coarse.as_mut()) {
                let w = weights[stage];
                for i in 0..N {
                    coarse[i] += h * w * k_s[i];
                }
            }
        }
        Step {
            y: y_next,
            error,
            coarse,
        }
    }
}

/// Copy `values` into a zero-padded stage array.
const fn pad(values: &[f64]) -> [f64; MAX_STAGES] {
    let mut out = [0.0; MAX_STAGES];
    let mut i = 0;
    while i < values.len() {
        out[i] = values[i];
        i += 1;
    }
    out
}

/// Lower-triangular coefficient matrix from its leading rows.
const fn rows(values: &[&[f64]]) -> [[f64; MAX_STAGES]; MAX_STAGES] {
    let mut out = [[0.0; MAX_STAGES]; MAX_STAGES];
    let mut i = 0;
    while i < values.len() {
        out[i] = pad(values[i]);
        i += 1;
    }
    out
}

/// Dormand-Prince 5(4), propagating the fifth-order solution.
pub(crate) static DORMAND_PRINCE: Tableau = Tableau {
    name: "dormand-prince 5(4)",
    stages: 7,
    c: pad(&[0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0]),
    a: rows(&[
        &[],
        &[1.0 / 5.0],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
        &[
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
        &[
            35.0 / 384.0,
            0.0,
            500.0 / 1113.0,
            125.0 / 192.0,
            -2187.0 / 6784.0,
            11.0 / 84.0,
        ],
    ]),
    b: pad(&[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ]),
    error: ErrorWeights::Embedded(pad(&[
        5179.0 / 57600.0,
        0.0,
        7571.0 / 16695.0,
        393.0 / 640.0,
        -92097.0 / 339200.0,
        187.0 / 2100.0,
        1.0 / 40.0,
    ])),
    error_exponent: 1.0 / 5.0,
};

/// Dormand-Prince 8(5,3), the twelve-stage eighth-order scheme of DOP853.
pub(crate) static DORMAND_PRINCE_853: Tableau = Tableau {
    name: "dormand-prince 8(5,3)",
    stages: 12,
    c: pad(&[
        0.0,
        0.05260015195876773,
        0.0789002279381516,
        0.1183503419072274,
        0.2816496580927726,
        0.3333333333333333,
        0.25,
        0.3076923076923077,
        0.6512820512820513,
        0.6,
        0.8571428571428571,
        1.0,
    ]),
    a: rows(&[
        &[],
        &[0.05260015195876773],
        &[0.0197250569845379, 0.0591751709536137],
        &[0.02958758547680685, 0.0, 0.08876275643042054],
        &[0.2413651341592667, 0.0, -0.8845494793282861, 0.924834003261792],
        &[0.037037037037037035, 0.0, 0.0, 0.17082860872947386, 0.12546768756682242],
        &[0.037109375, 0.0, 0.0, 0.17025221101954405, 0.06021653898045596, -0.017578125],
        &[
            0.03709200011850479,
            0.0,
            0.0,
            0.17038392571223998,
            0.10726203044637328,
            -0.015319437748624402,
            0.008273789163814023,
        ],
        &[
            0.6241109587160757,
            0.0,
            0.0,
            -3.3608926294469414,
            -0.868219346841726,
            27.59209969944671,
            20.154067550477894,
            -43.48988418106996,
        ],
        &[
            0.47766253643826434,
            0.0,
            0.0,
            -2.4881146199716677,
            -0.590290826836843,
            21.230051448181193,
            15.279233632882423,
            -33.28821096898486,
            -0.020331201708508627,
        ],
        &[
            -0.9371424300859873,
            0.0,
            0.0,
            5.186372428844064,
            1.0914373489967295,
            -8.149787010746927,
            -18.52006565999696,
            22.739487099350505,
            2.4936055526796523,
            -3.0467644718982196,
        ],
        &[
            2.273310147516538,
            0.0,
            0.0,
            -10.53449546673725,
            -2.0008720582248625,
            -17.9589318631188,
            27.94888452941996,
            -2.8589982771350235,
            -8.87285693353063,
            12.360567175794303,
            0.6433927460157636,
        ],
    ]),
    b: pad(&[
        0.054293734116568765,
        0.0,
        0.0,
        0.0,
        0.0,
        4.450312892752409,
        1.8915178993145003,
        -5.801203960010585,
        0.3111643669578199,
        -0.1521609496625161,
        0.20136540080403034,
        0.04471061572777259,
    ]),
    error: ErrorWeights::Blended {
        fifth: pad(&[
            0.01312004499419488,
            0.0,
            0.0,
            0.0,
            0.0,
            -1.2251564463762044,
            -0.4957589496572502,
            1.6643771824549864,
            -0.35032884874997366,
            0.3341791187130175,
            0.08192320648511571,
            -0.022355307863886294,
        ]),
        third: pad(&[
            -0.18980075407240762,
            0.0,
            0.0,
            0.0,
            0.0,
            4.450312892752409,
            1.8915178993145003,
            -5.801203960010585,
            -0.4226823213237919,
            -0.1521609496625161,
            0.20136540080403034,
            0.02265179219836082,
        ]),
    },
    error_exponent: 1.0 / 8.0,
};

/// Cash-Karp 5(4), propagating the fifth-order solution.
pub(crate) static CASH_KARP: Tableau = Tableau {
    name: "cash-karp 5(4)",
    stages: 6,
    c: pad(&[0.0, 1.0 / 5.0, 3.0 / 10.0, 3.0 / 5.0, 1.0, 7.0 / 8.0]),
    a: rows(&[
        &[],
        &[1.0 / 5.0],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[3.0 / 10.0, -9.0 / 10.0, 6.0 / 5.0],
        &[-11.0 / 54.0, 5.0 / 2.0, -70.0 / 27.0, 35.0 / 27.0],
        &[
            1631.0 / 55296.0,
            175.0 / 512.0,
            575.0 / 13824.0,
            44275.0 / 110592.0,
            253.0 / 4096.0,
        ],
    ]),
    b: pad(&[
        37.0 / 378.0,
        0.0,
        250.0 / 621.0,
        125.0 / 594.0,
        0.0,
        512.0 / 1771.0,
    ]),
    error: ErrorWeights::Embedded(pad(&[
        2825.0 / 27648.0,
        0.0,
        18575.0 / 48384.0,
        13525.0 / 55296.0,
        277.0 / 14336.0,
        1.0 / 4.0,
    ])),
    error_exponent: 1.0 / 5.0,
};

/// Runge-Kutta-Fehlberg 4(5), propagating the fifth-order solution.
pub(crate) static FEHLBERG: Tableau = Tableau {
    name: "fehlberg 4(5)",
    stages: 6,
    c: pad(&[0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0]),
    a: rows(&[
        &[],
        &[1.0 / 4.0],
        &[3.0 / 32.0, 9.0 / 32.0],
        &[1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0],
        &[439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0],
        &[
            -8.0 / 27.0,
            2.0,
            -3544.0 / 2565.0,
            1859.0 / 4104.0,
            -11.0 / 40.0,
        ],
    ]),
    b: pad(&[
        16.0 / 135.0,
        0.0,
        6656.0 / 12825.0,
        28561.0 / 56430.0,
        -9.0 / 50.0,
        2.0 / 55.0,
    ]),
    error: ErrorWeights::Embedded(pad(&[
        25.0 / 216.0,
        0.0,
        1408.0 / 2565.0,
        2197.0 / 4104.0,
        -1.0 / 5.0,
    ])),
    error_exponent: 1.0 / 5.0,
};
