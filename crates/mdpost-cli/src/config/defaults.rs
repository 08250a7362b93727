pub struct DefaultsConfig {
    pub temperature: f64,
    pub comment_token: String,
    pub delimiter: char,
    pub write_metadata: bool,
    pub comment_header: bool,

    pub pdf_ext_start: f64,
    pub pdf_ext_end: f64,
    pub pdf_ext_bin_count: usize,

    pub traj_ext_bin_size: f64,
    pub traj_frame_bin_size: usize,

    pub fpt_ext_bin_count: usize,
    pub fpt_step: usize,

    pub potential_column: String,
    pub landscape_coordinate_column: String,
    pub landscape_sp_column: String,

    pub pdf_output: &'static str,
    pub sp_pmf_output: &'static str,
    pub sp_traj_output: &'static str,
    pub sp_potential_output: &'static str,
    pub landscape_output: &'static str,
    pub fpt_output: &'static str,
    pub specific_heat_output: &'static str,
    pub energy_output: &'static str,
    pub energy_average_output: &'static str,
    pub smd_output: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            comment_token: "#".to_string(),
            delimiter: '\t',
            write_metadata: true,
            comment_header: false,

            pdf_ext_start: 0.0,
            pdf_ext_end: 100.0,
            pdf_ext_bin_count: 1000,

            traj_ext_bin_size: 2.0,
            traj_frame_bin_size: 20,

            fpt_ext_bin_count: 100,
            fpt_step: 2500,

            potential_column: "POTENTIAL".to_string(),
            landscape_coordinate_column: "DIST".to_string(),
            landscape_sp_column: "SP".to_string(),

            pdf_output: "ext_pdf.csv",
            sp_pmf_output: "sp_pmf.csv",
            sp_traj_output: "sp_traj.csv",
            sp_potential_output: "sp_vs_dist.csv",
            landscape_output: "landscape.csv",
            fpt_output: "fpt.csv",
            specific_heat_output: "specific_heat.csv",
            energy_output: "energies.csv",
            energy_average_output: "energies_avg.csv",
            smd_output: "smd_pcv_force_displacement.csv",
        }
    }
}
