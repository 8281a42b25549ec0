mod recaptcha_tests;
